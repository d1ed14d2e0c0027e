use std::path::Path as FsPath;

use svg::{
    node::element::{path::Data, Group, Path},
    Document,
};

use crate::models::PieSlice;
use crate::services::geometry::{point_on_circle, CENTER, RADIUS};

fn arc(large_arc: f32, to: (f64, f64)) -> Vec<f32> {
    vec![RADIUS as f32, RADIUS as f32, 0.0, large_arc, 1.0, to.0 as f32, to.1 as f32]
}

/// `M c L start A r,r 0 large,1 end Z` for one slice. A slice spanning the
/// whole circle has identical endpoints, so it is drawn as two half arcs.
pub fn slice_path(slice: &PieSlice) -> Data {
    if slice.span() >= 360.0 {
        let opposite = point_on_circle(slice.start_angle + 180.0);
        return Data::new()
            .move_to((slice.start.x as f32, slice.start.y as f32))
            .elliptical_arc_to(arc(1.0, (opposite.x, opposite.y)))
            .elliptical_arc_to(arc(1.0, (slice.start.x, slice.start.y)))
            .close();
    }
    let large_arc = if slice.large_arc { 1.0 } else { 0.0 };
    Data::new()
        .move_to((CENTER.x as f32, CENTER.y as f32))
        .line_to((slice.start.x as f32, slice.start.y as f32))
        .elliptical_arc_to(arc(large_arc, (slice.end.x, slice.end.y)))
        .close()
}

pub fn render_pie(slices: &[PieSlice]) -> Document {
    // 0° sits at three o'clock in SVG space; rotate so the chart starts at noon.
    let group = slices
        .iter()
        .filter(|slice| !slice.is_empty())
        .fold(
            Group::new().set(
                "transform",
                format!("rotate(-90 {} {})", CENTER.x, CENTER.y),
            ),
            |group, slice| {
                group.add(
                    Path::new()
                        .set("aria-label", slice.category.label())
                        .set("fill", slice.category.color())
                        .set("d", slice_path(slice)),
                )
            },
        );

    Document::new()
        .set("width", 200)
        .set("height", 200)
        .set("viewBox", (0, 0, 100, 100))
        .add(group)
}

pub fn save_pie(file: &FsPath, slices: &[PieSlice]) -> std::io::Result<()> {
    svg::save(file, &render_pie(slices))
}
