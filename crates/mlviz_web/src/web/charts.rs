//! Canvas rendering of card charts.

use mlviz::config::ChartTheme;
use mlviz::model::{ChartKind, PointShape, Series};
use mlviz::presenter::ChartDescriptor;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::ui_model::{ticks, PlotBounds};

const BG_COLOR: &str = "rgba(17, 24, 39, 0.5)";
const LEGEND_H: f64 = 22.0;
const AXIS_W: f64 = 34.0;
const AXIS_H: f64 = 18.0;
const GRID_LINES: usize = 5;

fn context(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, String> {
    Ok(canvas
        .get_context("2d")
        .map_err(|_| "get_context failed")?
        .ok_or("no 2d context")?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| "cast failed")?)
}

/// Draw one card chart: legend, grid with tick labels, then every series.
pub fn draw_chart(
    canvas: &HtmlCanvasElement,
    chart: &ChartDescriptor,
    theme: &ChartTheme,
) -> Result<(), String> {
    let ctx = context(canvas)?;

    let w = canvas.width() as f64;
    let h = canvas.height() as f64;

    ctx.clear_rect(0.0, 0.0, w, h);
    ctx.set_fill_style_str(BG_COLOR);
    ctx.fill_rect(0.0, 0.0, w, h);

    draw_legend(&ctx, &chart.series, theme, w);

    let Some(bounds) = PlotBounds::from_series(&chart.series) else {
        return Ok(());
    };

    // Plot area below the legend, right of the y labels, above the x labels.
    let px = AXIS_W;
    let py = LEGEND_H;
    let pw = (w - AXIS_W - 8.0).max(1.0);
    let ph = (h - LEGEND_H - AXIS_H).max(1.0);

    draw_grid(&ctx, &bounds, theme, (px, py, pw, ph));

    for s in &chart.series {
        match chart.kind {
            ChartKind::Scatter => draw_scatter(&ctx, s, &bounds, theme, (px, py, pw, ph)),
            ChartKind::Line => draw_line(&ctx, s, &bounds, (px, py, pw, ph)),
            ChartKind::Bar => draw_bars(&ctx, s, &bounds, (px, py, pw, ph)),
        }
    }

    Ok(())
}

fn draw_legend(ctx: &CanvasRenderingContext2d, series: &[Series], theme: &ChartTheme, w: f64) {
    ctx.set_font("11px system-ui, sans-serif");
    let mut x = 8.0;
    for s in series {
        if x > w - 40.0 {
            break;
        }
        ctx.set_fill_style_str(&s.style.background_color);
        ctx.set_stroke_style_str(&s.style.border_color);
        ctx.fill_rect(x, 6.0, 12.0, 10.0);
        ctx.stroke_rect(x, 6.0, 12.0, 10.0);
        ctx.set_fill_style_str(&theme.legend_color);
        ctx.fill_text(&s.label, x + 16.0, 15.0).ok();
        let text_w = ctx
            .measure_text(&s.label)
            .map(|m| m.width())
            .unwrap_or(s.label.len() as f64 * 6.0);
        x += 16.0 + text_w + 14.0;
    }
}

fn draw_grid(
    ctx: &CanvasRenderingContext2d,
    b: &PlotBounds,
    theme: &ChartTheme,
    (px, py, pw, ph): (f64, f64, f64, f64),
) {
    ctx.set_stroke_style_str(&theme.grid_color);
    ctx.set_line_width(0.5);
    ctx.set_fill_style_str(&theme.tick_color);
    ctx.set_font("10px system-ui, sans-serif");

    for (i, v) in ticks(b.min_y, b.max_y, GRID_LINES).into_iter().enumerate() {
        let y = py + ph - ph * i as f64 / (GRID_LINES - 1) as f64;
        ctx.begin_path();
        ctx.move_to(px, y);
        ctx.line_to(px + pw, y);
        ctx.stroke();
        ctx.fill_text(&format!("{v:.0}"), 4.0, y + 3.0).ok();
    }
    for (i, v) in ticks(b.min_x, b.max_x, GRID_LINES).into_iter().enumerate() {
        let x = px + pw * i as f64 / (GRID_LINES - 1) as f64;
        ctx.begin_path();
        ctx.move_to(x, py);
        ctx.line_to(x, py + ph);
        ctx.stroke();
        ctx.fill_text(&format!("{v:.0}"), x - 6.0, py + ph + 13.0).ok();
    }

    ctx.set_stroke_style_str(&theme.axis_border_color);
    ctx.set_line_width(1.0);
    ctx.stroke_rect(px, py, pw, ph);
}

fn draw_scatter(
    ctx: &CanvasRenderingContext2d,
    s: &Series,
    b: &PlotBounds,
    theme: &ChartTheme,
    (px, py, pw, ph): (f64, f64, f64, f64),
) {
    let r = s.style.point_radius.unwrap_or(theme.point_radius);
    ctx.set_fill_style_str(&s.style.background_color);
    ctx.set_stroke_style_str(&s.style.border_color);
    ctx.set_line_width(1.0);

    for p in &s.points {
        let (x, y) = b.to_canvas(*p, pw, ph);
        let (x, y) = (px + x, py + y);
        ctx.begin_path();
        match s.style.point_shape {
            Some(PointShape::Star) => star_path(ctx, x, y, r),
            Some(PointShape::Circle) | None => {
                ctx.arc(x, y, r, 0.0, std::f64::consts::PI * 2.0).ok();
            }
        }
        ctx.fill();
        ctx.stroke();
    }
}

fn star_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, r: f64) {
    let inner = r * 0.45;
    for i in 0..10 {
        let rad = if i % 2 == 0 { r } else { inner };
        let a = -std::f64::consts::FRAC_PI_2 + i as f64 * std::f64::consts::PI / 5.0;
        let (vx, vy) = (x + rad * a.cos(), y + rad * a.sin());
        if i == 0 {
            ctx.move_to(vx, vy);
        } else {
            ctx.line_to(vx, vy);
        }
    }
    ctx.close_path();
}

fn draw_line(
    ctx: &CanvasRenderingContext2d,
    s: &Series,
    b: &PlotBounds,
    (px, py, pw, ph): (f64, f64, f64, f64),
) {
    ctx.set_stroke_style_str(&s.style.border_color);
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for (i, p) in s.points.iter().enumerate() {
        let (x, y) = b.to_canvas(*p, pw, ph);
        if i == 0 {
            ctx.move_to(px + x, py + y);
        } else {
            ctx.line_to(px + x, py + y);
        }
    }
    ctx.stroke();
}

fn draw_bars(
    ctx: &CanvasRenderingContext2d,
    s: &Series,
    b: &PlotBounds,
    (px, py, pw, ph): (f64, f64, f64, f64),
) {
    if s.points.is_empty() {
        return;
    }
    let bar_w = (pw / s.points.len() as f64 * 0.6).clamp(2.0, 24.0);
    ctx.set_fill_style_str(&s.style.background_color);
    ctx.set_stroke_style_str(&s.style.border_color);
    ctx.set_line_width(1.0);
    for p in &s.points {
        let (x, y) = b.to_canvas(*p, pw, ph);
        let top = py + y;
        let height = (py + ph - top).max(0.0);
        ctx.fill_rect(px + x - bar_w / 2.0, top, bar_w, height);
        ctx.stroke_rect(px + x - bar_w / 2.0, top, bar_w, height);
    }
}
