//! Caller render functions and their augmented output

use crate::event_handler::EventHandlers;

type RenderItemFn<T, R> = Box<dyn Fn(&T, bool) -> R>;
type RenderMenuFn<R> = Box<dyn Fn(Vec<RenderedItem<R>>, &str, &str) -> R>;

/// Caller-supplied render functions
///
/// `R` is whatever the host renders into: a widget tree node, a string of
/// markup, or a plain struct in tests.
pub struct RenderFns<T, R> {
    render_item: RenderItemFn<T, R>,
    render_menu: Option<RenderMenuFn<R>>,
}

impl<T, R> RenderFns<T, R> {
    /// Render items with `render_item(item, is_highlighted)`
    pub fn new<F>(render_item: F) -> Self
    where
        F: Fn(&T, bool) -> R + 'static,
    {
        Self {
            render_item: Box::new(render_item),
            render_menu: None,
        }
    }

    /// Render the menu with `render_menu(items, menu_id, value)`
    ///
    /// The result must contain every item it is given, in order, with its
    /// handlers intact. Dropping or reordering items breaks keyboard
    /// navigation and highlighting.
    pub fn render_menu<F>(mut self, render_menu: F) -> Self
    where
        F: Fn(Vec<RenderedItem<R>>, &str, &str) -> R + 'static,
    {
        self.render_menu = Some(Box::new(render_menu));
        self
    }

    pub fn has_custom_menu(&self) -> bool {
        self.render_menu.is_some()
    }

    pub(crate) fn item(&self, item: &T, highlighted: bool) -> R {
        (self.render_item)(item, highlighted)
    }

    /// Wrap items with the custom menu, or in the default listbox
    pub(crate) fn menu(&self, items: Vec<RenderedItem<R>>, menu_id: &str, value: &str) -> MenuContent<R> {
        match &self.render_menu {
            Some(render_menu) => MenuContent::Custom(render_menu(items, menu_id, value)),
            None => MenuContent::Listbox {
                id: menu_id.to_string(),
                items,
            },
        }
    }
}

/// An item row with its engine wiring attached
#[derive(Debug)]
pub struct RenderedItem<R> {
    /// Stable render key (`item-<index>`)
    pub key: String,
    /// DOM id (`<menu_id>-item-<index>`)
    pub id: String,
    /// Position in the filtered list
    pub index: usize,
    pub highlighted: bool,
    pub selectable: bool,
    /// Output of the caller's `render_item`
    pub content: R,
    /// Hover/click bindings. Empty for non-selectable rows.
    pub handlers: EventHandlers,
}

/// Menu body
#[derive(Debug)]
pub enum MenuContent<R> {
    /// Default container: `<div id={id} role="listbox">items</div>`
    Listbox { id: String, items: Vec<RenderedItem<R>> },
    /// Output of the caller's `render_menu`
    Custom(R),
}

impl<R> MenuContent<R> {
    /// ARIA role of the default container
    pub const LISTBOX_ROLE: &'static str = "listbox";

    /// Items of the default listbox. Custom menus own their items.
    pub fn items(&self) -> Option<&[RenderedItem<R>]> {
        match self {
            MenuContent::Listbox { items, .. } => Some(items),
            MenuContent::Custom(_) => None,
        }
    }
}

/// The menu with the blur-arbiter bindings attached
#[derive(Debug)]
pub struct RenderedMenu<R> {
    pub content: MenuContent<R>,
    /// Pointer enter/leave and touch start bindings
    pub handlers: EventHandlers,
}
