//! Pie-slice geometry for the daily budget chart.
//!
//! The chart lives in a 100x100 view box: a circle of radius 40 centred on
//! (50, 50). Slices are laid out clockwise from 0° in the fixed order
//! earning, saving, spending.

use crate::models::{BudgetRecord, PieSlice, Point, SliceCategory};

pub const CENTER: Point = Point { x: 50.0, y: 50.0 };
pub const RADIUS: f64 = 40.0;

pub fn percentage(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total * 100.0
    } else {
        0.0
    }
}

pub fn point_on_circle(angle_deg: f64) -> Point {
    let rad = angle_deg.to_radians();
    Point {
        x: CENTER.x + RADIUS * rad.cos(),
        y: CENTER.y + RADIUS * rad.sin(),
    }
}

pub fn compute_slices(budget: &BudgetRecord) -> [PieSlice; 3] {
    let total = budget.daily_total();
    let mut cumulative = 0.0;

    SliceCategory::ORDER.map(|category| {
        let value = category.amount(budget);
        let pct = percentage(value, total);
        let start_angle = cumulative / 100.0 * 360.0;
        cumulative += pct;
        let span = pct / 100.0 * 360.0;
        let end_angle = start_angle + span;

        PieSlice {
            category,
            value,
            percentage: pct,
            start_angle,
            end_angle,
            large_arc: span > 180.0,
            start: point_on_circle(start_angle),
            end: point_on_circle(end_angle),
        }
    })
}
