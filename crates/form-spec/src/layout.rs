//! Row grouping on a 12-unit grid.
//!
//! Ordinary fields pack greedily into rows; fieldsets and langsets always
//! open their own row, and a field following a set starts a fresh one.

use std::mem;

use crate::spec::ElementKind;

pub const GRID_COLUMNS: u32 = 12;
pub const DEFAULT_LABEL_COLS: u32 = 2;
pub const DEFAULT_FIELD_COLS: u32 = 8;

pub fn get_label_cols(label_cols: u32) -> u32 {
    if label_cols == 0 {
        DEFAULT_LABEL_COLS
    } else {
        label_cols
    }
}

pub fn get_field_cols(field_cols: u32) -> u32 {
    if field_cols == 0 {
        DEFAULT_FIELD_COLS
    } else {
        field_cols
    }
}

/// Width of a labelled field; zero values fall back to the defaults.
pub fn get_cols(label_cols: u32, field_cols: u32) -> u32 {
    get_label_cols(label_cols).saturating_add(get_field_cols(field_cols))
}

/// Anything that can be laid out in a row.
pub trait LayoutItem {
    fn cols(&self) -> u32;

    fn element_kind(&self) -> ElementKind;

    fn has_error(&self) -> bool {
        false
    }
}

/// One row of borrowed elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a, T> {
    pub elements: Vec<&'a T>,
    pub has_error: bool,
}

impl<T> Default for Group<'_, T> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            has_error: false,
        }
    }
}

impl<T: LayoutItem> Group<'_, T> {
    pub fn cols(&self) -> u32 {
        self.elements
            .iter()
            .fold(0u32, |total, element| total.saturating_add(element.cols()))
    }
}

impl<T> Group<'_, T> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

pub type Groups<'a, T> = Vec<Group<'a, T>>;

/// Buckets `elements` into rows, preserving order.
pub fn split_group<T: LayoutItem>(elements: &[T]) -> Groups<'_, T> {
    let mut groups = Vec::new();
    let mut current = Group::default();
    let mut total = 0u32;
    let mut last_is_set = false;

    for (idx, element) in elements.iter().enumerate() {
        let is_set = element.element_kind().is_set();
        let cols = element.cols();
        if idx > 0 {
            let close = is_set
                || is_set != last_is_set
                || cols == 0
                || total.saturating_add(cols) > GRID_COLUMNS;
            if close {
                groups.push(mem::take(&mut current));
                total = 0;
            }
        }
        if element.has_error() {
            current.has_error = true;
        }
        current.elements.push(element);
        total = total.saturating_add(cols);
        last_is_set = is_set;
    }

    if !current.is_empty() {
        groups.push(current);
    }
    groups
}
