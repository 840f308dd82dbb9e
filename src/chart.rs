use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{anyhow, Context};
use plotters::prelude::*;

use crate::model::MonthlyTally;

// Series colors carried over from the matplotlib plots this replaces.
const WINS_WHITE: RGBColor = RGBColor(0xFF, 0x65, 0x65);
const WINS_BLACK: RGBColor = RGBColor(0xB9, 0x00, 0x00);
const LOSSES_WHITE: RGBColor = RGBColor(0x65, 0x9B, 0xFF);
const LOSSES_BLACK: RGBColor = RGBColor(0x00, 0x2F, 0x87);
const DRAWS: RGBColor = RGBColor(0x25, 0xD3, 0x12);

const BAR_WIDTH: f64 = 0.22;

/// Expand a month -> tally map into twelve slots (index = month - 1),
/// zero-filling months with no games.
pub fn year_slots(months: &BTreeMap<String, MonthlyTally>) -> anyhow::Result<[MonthlyTally; 12]> {
    let mut slots: [MonthlyTally; 12] = Default::default();
    for (month, tally) in months {
        let idx: usize = month
            .parse()
            .with_context(|| format!("month key {month:?}"))?;
        if !(1..=12).contains(&idx) {
            anyhow::bail!("month key {month:?} out of range");
        }
        slots[idx - 1] = tally.clone();
    }
    Ok(slots)
}

fn month_abbrev(idx: usize) -> String {
    chrono::NaiveDate::from_ymd_opt(2000, idx as u32 + 1, 1)
        .map(|d| d.format("%b").to_string())
        .unwrap_or_default()
}

/// Draw one year: per month a wins stack (white below black), a losses
/// stack, and a draws bar, Jan..Dec left to right.
pub fn render_year(
    path: &Path,
    year: &str,
    months: &BTreeMap<String, MonthlyTally>,
) -> anyhow::Result<()> {
    let slots = year_slots(months)?;
    let y_max = slots
        .iter()
        .map(|t| {
            (t.wins_as_white + t.wins_as_black)
                .max(t.losses_as_white + t.losses_as_black)
                .max(t.draws)
        })
        .max()
        .unwrap_or(0)
        .max(1);

    let fail = |e: &dyn std::fmt::Display| anyhow!("rendering {}: {e}", path.display());

    let root = SVGBackend::new(path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| fail(&e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(year, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(34)
        .y_label_area_size(44)
        .build_cartesian_2d(-0.6f64..11.6f64, 0u32..y_max + 1)
        .map_err(|e| fail(&e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(13)
        .x_label_formatter(&|x| {
            let m = x.round() as i32;
            if (0..12).contains(&m) && (x - f64::from(m)).abs() < 1e-6 {
                month_abbrev(m as usize)
            } else {
                String::new()
            }
        })
        .y_desc("games")
        .draw()
        .map_err(|e| fail(&e))?;

    // (label, color, bar offset within the month, stack bottom, stack top)
    type Level = fn(&MonthlyTally) -> u32;
    let series: [(&str, RGBColor, f64, Level, Level); 5] = [
        ("Wins (white)", WINS_WHITE, -0.25, |_| 0, |t| t.wins_as_white),
        (
            "Wins (black)",
            WINS_BLACK,
            -0.25,
            |t| t.wins_as_white,
            |t| t.wins_as_white + t.wins_as_black,
        ),
        ("Losses (white)", LOSSES_WHITE, 0.0, |_| 0, |t| t.losses_as_white),
        (
            "Losses (black)",
            LOSSES_BLACK,
            0.0,
            |t| t.losses_as_white,
            |t| t.losses_as_white + t.losses_as_black,
        ),
        ("Draws", DRAWS, 0.25, |_| 0, |t| t.draws),
    ];

    for (label, color, offset, bottom, top) in series {
        let bars = slots.iter().enumerate().filter_map(move |(i, tally)| {
            let (y0, y1) = (bottom(tally), top(tally));
            if y0 == y1 {
                return None;
            }
            let x = i as f64 + offset;
            Some(Rectangle::new(
                [(x - BAR_WIDTH / 2.0, y0), (x + BAR_WIDTH / 2.0, y1)],
                color.filled(),
            ))
        });
        chart
            .draw_series(bars)
            .map_err(|e| fail(&e))?
            .label(label)
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| fail(&e))?;

    root.present().map_err(|e| fail(&e))?;
    Ok(())
}
