//! src/view/components/record_table.rs

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, HighlightSpacing, Row, Table, TableState},
};
use smallvec::SmallVec;

use crate::{
    engine::view_engine::{DisplayMode, PageView},
    model::{record::RecordField, ui_state::UIState},
    view::theme::Palette,
};

pub const EMPTY_MESSAGE: &str = "No users found";

const BASE_COLUMNS: [RecordField; 5] = [
    RecordField::FirstName,
    RecordField::LastName,
    RecordField::Gender,
    RecordField::Email,
    RecordField::JobTitle,
];

pub struct RecordTable;

impl RecordTable {
    pub fn new() -> Self {
        Self
    }

    pub fn columns(show_id: bool) -> SmallVec<[RecordField; 6]> {
        let mut columns = SmallVec::new();
        if show_id {
            columns.push(RecordField::Id);
        }
        columns.extend_from_slice(&BASE_COLUMNS);
        columns
    }

    fn width(field: RecordField) -> Constraint {
        match field {
            RecordField::Id => Constraint::Length(6),
            RecordField::Gender => Constraint::Length(12),
            RecordField::Email => Constraint::Fill(2),
            _ => Constraint::Fill(1),
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        view: &PageView<'_>,
        ui_state: &UIState,
        palette: &Palette,
        area: Rect,
    ) {
        let columns = Self::columns(ui_state.show_id);

        let header = Row::new(columns.iter().map(|field| {
            let label = field.label();
            if *field == view.sort.field {
                Cell::from(format!("{label} {}", view.sort.direction.label()))
            } else {
                Cell::from(label)
            }
        }))
        .style(palette.header_style())
        .bottom_margin(1);

        let rows: Vec<Row> = match view.mode {
            DisplayMode::Rows => view
                .rows
                .iter()
                .map(|record| {
                    Row::new(
                        columns
                            .iter()
                            .map(|field| Cell::from(record.field(*field).into_owned())),
                    )
                    .style(Style::default().fg(palette.foreground))
                })
                .collect(),
            DisplayMode::Empty => vec![
                Row::new([Cell::from(EMPTY_MESSAGE)]).style(Style::default().fg(palette.dim)),
            ],
        };

        let widths: SmallVec<[Constraint; 6]> = columns.iter().map(|f| Self::width(*f)).collect();

        let selected = match view.mode {
            DisplayMode::Rows => ui_state.selected,
            DisplayMode::Empty => None,
        };
        let mut table_state = TableState::default().with_selected(selected);

        let title = format!(" Users ({} of {}) ", view.filtered_count, view.total_count);

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .title_style(palette.title_style())
                    .border_style(palette.border_style())
                    .style(Style::default().bg(palette.background)),
            )
            .row_highlight_style(palette.highlight_style())
            .highlight_symbol("▶ ")
            .highlight_spacing(HighlightSpacing::Always);

        frame.render_stateful_widget(table, area, &mut table_state);
    }
}

impl Default for RecordTable {
    fn default() -> Self {
        Self::new()
    }
}
