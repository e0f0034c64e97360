//! Pure result-card formatters: typed API data in, ratatui text out. A row
//! appears if and only if its backing field is non-empty.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::api::{Element, Part, SearchKind};
use crate::tui::theme::{self, flexoki};
use crate::tui::to_color;

pub const PLACEHOLDER_IMAGE: &str = "https://rebrickable.com/static/img/npd.png";
const UNKNOWN_PART: &str = "Unknown Part";
const UNKNOWN_CATEGORY: &str = "Unknown Category";

fn title_line(name: Option<&str>) -> Line<'static> {
    Line::from(Span::styled(
        name.unwrap_or(UNKNOWN_PART).to_string(),
        Style::default()
            .fg(to_color(flexoki::YELLOW_400))
            .add_modifier(Modifier::BOLD),
    ))
}

fn badge_line(text: String) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(to_color(flexoki::BLUE_400)),
    ))
}

fn label(name: &str) -> Span<'static> {
    Span::styled(
        format!("{name}: "),
        Style::default()
            .fg(to_color(flexoki::BASE_500))
            .add_modifier(Modifier::BOLD),
    )
}

fn row(name: &str, value: String) -> Line<'static> {
    Line::from(vec![label(name), Span::raw(value)])
}

fn nonempty(field: Option<&String>) -> Option<String> {
    field.filter(|value| !value.is_empty()).cloned()
}

fn image_url(url: Option<&String>) -> String {
    nonempty(url).unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
}

fn part_page(part_num: &str) -> String {
    format!("https://rebrickable.com/parts/{part_num}/")
}

pub fn part_card(part: &Part) -> Vec<Line<'static>> {
    let mut lines = vec![
        title_line(part.name.as_deref()),
        badge_line(format!("Part #{}", part.part_num)),
        Line::default(),
        row(
            "Category",
            nonempty(part.part_cat_id.as_ref()).unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
        ),
    ];

    if let Some(material) = nonempty(part.part_material.as_ref()) {
        lines.push(row("Material", material));
    }

    if part.year_from.is_some() || part.year_to.is_some() {
        let from = part
            .year_from
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        let to = part
            .year_to
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Present".to_string());
        lines.push(row("Years", format!("{from} - {to}")));
    }

    lines.push(row("Image", image_url(part.part_img_url.as_ref())));
    lines.push(row("Rebrickable", part_page(&part.part_num)));
    lines
}

pub fn element_card(element: &Element) -> Vec<Line<'static>> {
    let mut lines = vec![
        title_line(element.part.name.as_deref()),
        badge_line(format!("Element #{}", element.id)),
        Line::default(),
        row("Part Number", element.part.part_num.clone()),
    ];

    if let Some(color) = &element.color {
        let mut spans = vec![label("Color")];
        if let Some(swatch) = theme::parse_rgb(&color.rgb) {
            spans.push(Span::styled("██ ", Style::default().fg(swatch)));
        }
        spans.push(Span::raw(format!("{} ({})", color.name, color.id)));
        lines.push(Line::from(spans));
    }

    if let Some(category) = nonempty(element.part.part_cat_id.as_ref()) {
        lines.push(row("Category", category));
    }

    if let Some(image) = nonempty(element.element_img_url.as_ref()) {
        lines.push(row("Element Image", image));
    }

    lines.push(row("Image", image_url(element.part.part_img_url.as_ref())));
    lines.push(row("Rebrickable", part_page(&element.part.part_num)));
    lines
}

pub fn no_results_lines(kind: SearchKind, term: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            format!("No {} found", kind.noun()),
            Style::default()
                .fg(to_color(flexoki::BASE_300))
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(format!(
            "No {} matching \"{}\" was found in the Rebrickable database.",
            kind.noun(),
            term
        )),
        Line::from("Try checking your spelling or using a different search term."),
    ]
}
