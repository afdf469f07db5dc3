use crate::{
    designer::{
        designer_state::DesignerState,
        drag::{DragEngine, DragSource, DropTarget, Half},
    },
    element::{
        html::escape_html,
        properties::render_properties_html,
        registry::{render_designer, render_palette},
    },
    error::PropertyErrors,
};

// ============================================================================
// Designer page: canvas + sidebar + drag overlay
// ============================================================================

/// Render the whole designer: canvas on the left, palette or properties
/// panel on the right, and the drag overlay when a gesture is in flight.
pub fn render_designer_page(
    designer: &DesignerState,
    drag: &DragEngine,
    property_errors: Option<&PropertyErrors>,
) -> String {
    let mut out = String::from("<div class=\"designer\">\n");
    out.push_str(&render_canvas(designer, drag));
    out.push_str(&render_sidebar(designer, property_errors));
    out.push_str(&drag.overlay(designer.elements()).render_html());
    out.push_str("</div>\n");
    out
}

/// Palette when nothing is selected, otherwise the selected element's
/// properties form.
pub fn render_sidebar(designer: &DesignerState, property_errors: Option<&PropertyErrors>) -> String {
    let body = match designer.selected_element() {
        None => render_palette(),
        Some(selected) => format!(
            "<div class=\"properties-panel\"><p>Element properties</p><button class=\"close\" data-action=\"deselect\">Close</button>\n{}</div>\n",
            render_properties_html(selected, property_errors)
        ),
    };
    format!("<aside class=\"sidebar\">\n{}</aside>\n", body)
}

pub fn render_canvas(designer: &DesignerState, drag: &DragEngine) -> String {
    let hovered = drag.hovered();
    let canvas_hovered = matches!(hovered, Some(DropTarget::DesignerDropArea));

    let mut out = format!(
        "<div class=\"canvas{}\" data-drop=\"designer-drop-area\">\n",
        if canvas_hovered { " drop-active" } else { "" }
    );

    if designer.is_empty() && !canvas_hovered {
        out.push_str("<p class=\"drop-here\">Drop here</p>\n");
    }

    for element in designer.elements() {
        // The dragged element is shown only in the overlay
        if drag.is_dragging_element(element.id()) {
            continue;
        }

        let id = element.id();
        let indicator = |half: Half| match hovered {
            Some(DropTarget::ElementHalf { element_id, half: h }) if element_id == id && *h == half => {
                "<div class=\"drop-indicator\"></div>"
            }
            _ => "",
        };
        let selected = designer.selected_id() == Some(id);

        out.push_str(&format!(
            "<div class=\"designer-element{}\" data-id=\"{}\">\
             <div class=\"drop-zone top\" data-drop=\"top\"></div>\
             <div class=\"drop-zone bottom\" data-drop=\"bottom\"></div>\
             {}<button class=\"remove\" data-action=\"remove\">Remove</button>{}{}</div>\n",
            if selected { " selected" } else { "" },
            escape_html(id),
            indicator(Half::Top),
            render_designer(element),
            indicator(Half::Bottom),
        ));
    }

    // Placeholder at the end of the list while a palette button hovers the canvas
    if canvas_hovered && matches!(drag.active(), Some(DragSource::PaletteButton { .. })) {
        out.push_str("<div class=\"drop-placeholder\"></div>\n");
    }

    out.push_str("</div>\n");
    out
}
