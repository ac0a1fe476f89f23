//! View assembly
//!
//! [`render_view`] turns the engine's current state into a
//! [`ComboboxView`]: wrapper and input attributes, the live region, the
//! menu (only while open) and the debug dump. It also rebuilds the element
//! registry so later effects find the rows that are on screen.

use crate::aria::{InputAria, LiveRegion, WrapperAria};
use crate::event_handler::EventHandlers;
use crate::registry::{ElementKey, ElementRegistry};
use crate::render::{RenderFns, RenderedItem, RenderedMenu};
use combobox_core::Combobox;

/// The text input
#[derive(Debug)]
pub struct RenderedInput {
    pub value: String,
    pub aria: InputAria,
    pub handlers: EventHandlers,
}

/// Everything the host needs to draw one combobox
#[derive(Debug)]
pub struct ComboboxView<R> {
    pub wrapper: WrapperAria,
    pub input: RenderedInput,
    pub live_region: LiveRegion,
    /// Present while the menu is open
    pub menu: Option<RenderedMenu<R>>,
    /// Pretty JSON of recent state snapshots, when debugging
    pub debug: Option<String>,
}

impl<R> ComboboxView<R> {
    /// Items of a default listbox menu
    pub fn items(&self) -> &[RenderedItem<R>] {
        self.menu
            .as_ref()
            .and_then(|menu| menu.content.items())
            .unwrap_or(&[])
    }
}

/// Render `combobox` with the caller's render functions
pub fn render_view<T, R, H>(
    combobox: &Combobox<T>,
    fns: &RenderFns<T, R>,
    registry: &mut ElementRegistry<H>,
) -> ComboboxView<R>
where
    T: Clone,
{
    let menu_id = combobox.config().menu_id.clone();
    let open = combobox.is_open();
    let highlighted = combobox.visible_highlight();

    registry.begin_render();
    if !registry.contains(ElementKey::Input) {
        registry.register(ElementKey::Input, None);
    }

    let menu = open.then(|| {
        let filtered = combobox.filtered_items();
        let items: Vec<RenderedItem<R>> = filtered
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let is_highlighted = highlighted == Some(index);
                let selectable = combobox.is_item_selectable(item);
                let id = combobox.item_id(index);
                registry.register(ElementKey::Item(index), Some(id.clone()));
                RenderedItem {
                    key: ElementKey::Item(index).render_key(),
                    id,
                    index,
                    highlighted: is_highlighted,
                    selectable,
                    content: fns.item(item, is_highlighted),
                    handlers: if selectable {
                        EventHandlers::for_item(index)
                    } else {
                        EventHandlers::new()
                    },
                }
            })
            .collect();

        registry.register(ElementKey::Menu, Some(menu_id.clone()));
        RenderedMenu {
            content: fns.menu(items, &menu_id, combobox.value()),
            handlers: EventHandlers::for_menu(),
        }
    });

    let debug = match combobox.debug_json() {
        Some(Ok(json)) => Some(json),
        Some(Err(err)) => {
            tracing::warn!("Failed to render debug snapshots: {}", err);
            None
        }
        None => None,
    };

    ComboboxView {
        wrapper: WrapperAria {
            expanded: open,
            owns: menu_id.clone(),
        },
        input: RenderedInput {
            value: combobox.value().to_string(),
            aria: InputAria {
                controls: menu_id,
                active_descendant: highlighted.map(|index| combobox.item_id(index)),
            },
            handlers: EventHandlers::for_input(),
        },
        live_region: LiveRegion {
            text: combobox.announcement().unwrap_or_default(),
        },
        menu,
        debug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MenuContent;
    use combobox_core::{ComboboxConfig, ComboboxEvent, ItemAccessors};
    use std::sync::Arc;

    fn combobox() -> Combobox<&'static str> {
        let accessors = ItemAccessors::new(|s: &&str| s.to_string())
            .should_item_render(|s, v| s.to_lowercase().contains(&v.to_lowercase()))
            .is_item_selectable(|s| !s.starts_with('#'));
        let mut combobox = Combobox::new(ComboboxConfig::new("fruit-menu"), accessors).unwrap();
        let items: Arc<[&str]> = vec!["# Berries", "Blueberry", "Banana", "Cherry"].into();
        combobox.set_items(items);
        combobox
    }

    fn plain() -> RenderFns<&'static str, String> {
        RenderFns::new(|item: &&str, highlighted| {
            if highlighted {
                format!("[{}]", item)
            } else {
                item.to_string()
            }
        })
    }

    #[test]
    fn test_closed_view_has_no_menu() {
        let combobox = combobox();
        let mut registry: ElementRegistry<()> = ElementRegistry::new();
        let view = render_view(&combobox, &plain(), &mut registry);

        assert!(view.menu.is_none());
        assert!(!view.wrapper.expanded);
        assert_eq!(view.input.aria.active_descendant, None);
        assert_eq!(view.live_region.text, "");
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec![ElementKey::Input]);
    }

    #[test]
    fn test_open_view_wires_items() {
        let mut combobox = combobox();
        combobox.handle(ComboboxEvent::Change("b".to_string()));
        combobox.set_value("b");

        let mut registry: ElementRegistry<()> = ElementRegistry::new();
        let view = render_view(&combobox, &plain(), &mut registry);

        assert!(view.wrapper.expanded);
        let items = view.items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].content, "# Berries");
        assert!(items[0].handlers.is_empty());
        assert_eq!(items[1].content, "[Blueberry]");
        assert_eq!(items[1].id, "fruit-menu-item-1");
        assert_eq!(items[1].key, "item-1");
        assert_eq!(
            view.input.aria.active_descendant.as_deref(),
            Some("fruit-menu-item-1")
        );
        assert_eq!(
            view.live_region.text,
            "3 Autocomplete results are available below."
        );
        assert_eq!(registry.dom_id(ElementKey::Menu), Some("fruit-menu"));
        assert_eq!(registry.dom_id(ElementKey::Item(2)), Some("fruit-menu-item-2"));
    }

    #[test]
    fn test_rerender_drops_stale_rows() {
        let mut combobox = combobox();
        combobox.handle(ComboboxEvent::Change("b".to_string()));
        combobox.set_value("b");
        let mut registry: ElementRegistry<()> = ElementRegistry::new();
        render_view(&combobox, &plain(), &mut registry);
        assert!(registry.contains(ElementKey::Item(2)));

        combobox.handle(ComboboxEvent::Change("blue".to_string()));
        combobox.set_value("blue");
        render_view(&combobox, &plain(), &mut registry);
        assert!(registry.contains(ElementKey::Item(0)));
        assert!(!registry.contains(ElementKey::Item(1)));
    }

    #[test]
    fn test_custom_menu_receives_items() {
        let mut combobox = combobox();
        combobox.handle(ComboboxEvent::Change("an".to_string()));
        combobox.set_value("an");

        let fns = plain().render_menu(|items, menu_id, value| {
            let rows: Vec<String> = items.into_iter().map(|item| item.content).collect();
            format!("{}|{}|{}", menu_id, value, rows.join(","))
        });
        let mut registry: ElementRegistry<()> = ElementRegistry::new();
        let view = render_view(&combobox, &fns, &mut registry);

        match view.menu.map(|menu| menu.content) {
            Some(MenuContent::Custom(out)) => assert_eq!(out, "fruit-menu|an|Banana"),
            other => panic!("expected custom menu, got {:?}", other),
        }
    }
}
