// SPDX-FileCopyrightText: 2026 Enrico Zini <enrico@enricozini.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{borrow::Cow, fmt};

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

/// One column of a [`Table`]: how to name, render and style a cell.
pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;

    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

/// A data table rendered through a [`TableStyle`] when displayed.
#[derive(Debug)]
pub struct Table<'a, S, C, T> {
    style: S,
    columns: &'a [C],
    data: &'a [T],
}

impl<'a, S: TableStyle, C: TableColumn<T>, T> Table<'a, S, C, T> {
    pub fn new(style: S, columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            style,
            columns,
            data,
        }
    }
}

impl<S: TableStyle, C: TableColumn<T>, T> fmt::Display for Table<'_, S, C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.style.fmt_table(f, self.columns, self.data)
    }
}

pub trait TableStyle {
    fn fmt_table<C: TableColumn<T>, T>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result;
}

/// Plain aligned columns separated by single spaces, colored per cell.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableStyleBasic;

impl TableStyleBasic {
    pub fn new() -> Self {
        Self
    }
}

impl TableStyle for TableStyleBasic {
    fn fmt_table<C: TableColumn<T>, T>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result {
        let cells: Vec<Vec<String>> = data
            .iter()
            .map(|row| columns.iter().map(|c| c.format(row).into_owned()).collect())
            .collect();
        let widths = column_max_widths(columns.len(), &cells);

        for (row, item) in cells.iter().zip(data) {
            for (i, (col, cell)) in columns.iter().zip(row).enumerate() {
                let last = i == columns.len() - 1;
                // The last column never needs trailing padding
                let cell = match col.padding_direction() {
                    PaddingDirection::Left if last => cell.clone(),
                    PaddingDirection::Left => pad_left(cell, widths[i]),
                    PaddingDirection::Right => pad_right(cell, widths[i]),
                };
                let cell = match col.color(item) {
                    Some(color) => cell.color(color).to_string(),
                    None => cell,
                };
                match last {
                    true => writeln!(f, "{cell}")?,
                    false => write!(f, "{cell} ")?,
                }
            }
        }
        Ok(())
    }
}

/// A JSON array of one object per row, keyed by column name.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableStyleJson;

impl TableStyleJson {
    pub fn new() -> Self {
        Self
    }
}

impl TableStyle for TableStyleJson {
    fn fmt_table<C: TableColumn<T>, T>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result {
        let rows: Vec<serde_json::Value> = data
            .iter()
            .map(|row| {
                let obj: serde_json::Map<String, serde_json::Value> = columns
                    .iter()
                    .map(|c| {
                        let key = c.name().to_lowercase().replace(' ', "_");
                        let value = serde_json::Value::String(c.format(row).into_owned());
                        (key, value)
                    })
                    .collect();
                serde_json::Value::Object(obj)
            })
            .collect();

        let text = serde_json::to_string_pretty(&rows).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

fn column_max_widths(n: usize, cells: &[Vec<String>]) -> Vec<usize> {
    let mut widths = vec![0; n];
    for row in cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }
    widths
}

fn pad_left(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    format!("{cell}{}", " ".repeat(fill))
}

fn pad_right(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    format!("{}{cell}", " ".repeat(fill))
}
