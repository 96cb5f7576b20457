use tracing::warn;

use crate::core::{ChartLayout, LabelAlign};
use crate::render::{Color, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

pub const CONNECTOR_STROKE_WIDTH: f64 = 1.0;
pub const AXIS_STROKE_WIDTH: f64 = 1.0;
/// Used when a host color string cannot be parsed.
pub const FALLBACK_COLOR: Color = Color::rgb(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0);

fn resolve_color(input: &str) -> Color {
    Color::from_css(input).unwrap_or_else(|err| {
        warn!(color = input, error = %err, "falling back to gray");
        FALLBACK_COLOR
    })
}

fn text_align(align: LabelAlign) -> TextHAlign {
    match align {
        LabelAlign::Left => TextHAlign::Left,
        LabelAlign::Right => TextHAlign::Right,
    }
}

/// Materializes a layout into draw primitives.
///
/// Bars keep the layout's paint order. Connectors run from each anchor to its
/// note point; hidden labels keep their connector but emit no text.
#[must_use]
pub fn build_render_frame(layout: &ChartLayout) -> RenderFrame {
    let mut frame = RenderFrame::new(layout.viewport);

    for (element, rect) in layout.bars() {
        let fill = resolve_color(&element.bar_color).with_opacity(element.opacity);
        frame = frame.with_rect(RectPrimitive::new(
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            fill,
        ));
    }

    for element in &layout.elements {
        let color = resolve_color(&element.text_color);
        let note = element.note_point();
        if element.connector {
            frame = frame.with_line(LinePrimitive::new(
                element.anchor.x,
                element.anchor.y,
                note.x,
                note.y,
                CONNECTOR_STROKE_WIDTH,
                color,
            ));
        }
        if !element.text.is_empty() {
            frame = frame.with_text(
                TextPrimitive::new(
                    element.text.clone(),
                    note.x,
                    note.y,
                    element.font_size,
                    color,
                    text_align(element.align),
                )
                .with_font_family(element.font_family.clone()),
            );
        }
    }

    if let Some(axis) = &layout.axis {
        let color = resolve_color(&axis.color);
        frame = frame.with_line(LinePrimitive::new(
            axis.x_start,
            axis.y,
            axis.x_end,
            axis.y,
            AXIS_STROKE_WIDTH,
            color,
        ));
        let label_y = axis.y + axis.font_size;
        for (label, x) in [(&axis.min_label, axis.x_start), (&axis.max_label, axis.x_end)] {
            if label.is_empty() {
                continue;
            }
            frame = frame.with_text(
                TextPrimitive::new(
                    label.clone(),
                    x,
                    label_y,
                    axis.font_size,
                    color,
                    TextHAlign::Center,
                )
                .with_font_family(axis.font_family.clone())
                .with_bold(axis.bold),
            );
        }
    }

    frame
}
