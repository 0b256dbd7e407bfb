use leptos::prelude::AnyView;
use std::sync::Arc;

use super::row_actions::RowMenu;

/// View-row produced from a fetched item
pub trait TableRow: Clone + Send + Sync + 'static {
    fn id(&self) -> String;

    /// Plain-text cell value, used when a column has no custom renderer
    fn cell(&self, field: &str) -> String;
}

pub type CellRenderer<R> = Arc<dyn Fn(&R) -> AnyView + Send + Sync>;

pub struct ColumnDef<R> {
    pub field: String,
    pub header: String,
    pub sortable: bool,
    pub width: Option<u32>,
    pub render: Option<CellRenderer<R>>,
}

impl<R> Clone for ColumnDef<R> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            header: self.header.clone(),
            sortable: self.sortable,
            width: self.width,
            render: self.render.clone(),
        }
    }
}

impl<R> ColumnDef<R> {
    pub fn new(field: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header: header.into(),
            sortable: true,
            width: None,
            render: None,
        }
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn width(mut self, px: u32) -> Self {
        self.width = Some(px);
        self
    }

    pub fn render(mut self, render: impl Fn(&R) -> AnyView + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(render));
        self
    }
}

pub enum RenderColumn<R> {
    Data(ColumnDef<R>),
    Actions,
}

impl<R> RenderColumn<R> {
    pub fn key(&self) -> String {
        match self {
            RenderColumn::Data(c) => c.field.clone(),
            RenderColumn::Actions => "__actions".to_string(),
        }
    }
}

/// Base columns plus an actions column when at least one row has a menu or lock glyph
pub fn render_columns<R>(base: &[ColumnDef<R>], menus: &[RowMenu]) -> Vec<RenderColumn<R>> {
    let mut columns: Vec<RenderColumn<R>> = base.iter().cloned().map(RenderColumn::Data).collect();
    if menus.iter().any(|m| !m.is_hidden()) {
        columns.push(RenderColumn::Actions);
    }
    columns
}
