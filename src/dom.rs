//! DOM changes the controllers ask for, and an in-memory page that applies them.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use crate::models::InputType;
use crate::render::Markup;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    LoadingOverlay,
    ErrorMessage,
    MainForm,
    UrlInput,
    AnalysisModeField,
    SubmitButton,
    /// Label next to the `input_type` radio for this mode.
    ModeLabel(InputType),
    LoadMoreButton,
    VideoGrid,
    VideoContainer,
    AnalyzeForm(usize),
    AnalyzeButton(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    SetValue { target: ElementId, value: String },
    SetPlaceholder { target: ElementId, value: String },
    SetText { target: ElementId, text: String },
    SetAttribute { target: ElementId, name: String, value: String },
    SetDisabled { target: ElementId, disabled: bool },
    SetVisible { target: ElementId, visible: bool },
    SetClass { target: ElementId, class: String, on: bool },
    /// `key` is the `data-*` name without its prefix.
    SetData { target: ElementId, key: String, value: String },
    AppendHtml { target: ElementId, html: Markup },
    Alert(String),
}

pub trait Host {
    fn apply(&mut self, patch: Patch);

    fn apply_all(&mut self, patches: Vec<Patch>) {
        for patch in patches {
            self.apply(patch);
        }
    }
}

#[derive(Debug, Clone)]
pub struct ElementState {
    pub value: String,
    pub placeholder: String,
    pub text: String,
    pub attributes: BTreeMap<String, String>,
    pub disabled: bool,
    pub visible: bool,
    pub classes: BTreeSet<String>,
    pub dataset: HashMap<String, String>,
    pub children: Vec<Markup>,
}

impl Default for ElementState {
    fn default() -> Self {
        ElementState {
            value: String::new(),
            placeholder: String::new(),
            text: String::new(),
            attributes: BTreeMap::new(),
            disabled: false,
            visible: true,
            classes: BTreeSet::new(),
            dataset: HashMap::new(),
            children: Vec::new(),
        }
    }
}

/// Page model for running the controllers without a browser.
#[derive(Debug, Default)]
pub struct MemoryPage {
    elements: HashMap<ElementId, ElementState>,
    pub alerts: Vec<String>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(&self, id: &ElementId) -> Option<&ElementState> {
        self.elements.get(id)
    }

    /// Get the element, creating it with default state if the page has not
    /// seen it yet.
    pub fn element_mut(&mut self, id: ElementId) -> &mut ElementState {
        self.elements.entry(id).or_default()
    }

    pub fn is_visible(&self, id: &ElementId) -> bool {
        self.element(id).map(|e| e.visible).unwrap_or(true)
    }

    pub fn is_disabled(&self, id: &ElementId) -> bool {
        self.element(id).map(|e| e.disabled).unwrap_or(false)
    }

    pub fn has_class(&self, id: &ElementId, class: &str) -> bool {
        self.element(id).map(|e| e.classes.contains(class)).unwrap_or(false)
    }

    pub fn data(&self, id: &ElementId, key: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.dataset.get(key)).map(String::as_str)
    }

    pub fn children(&self, id: &ElementId) -> &[Markup] {
        self.element(id).map(|e| e.children.as_slice()).unwrap_or(&[])
    }
}

impl Host for MemoryPage {
    fn apply(&mut self, patch: Patch) {
        match patch {
            Patch::SetValue { target, value } => self.element_mut(target).value = value,
            Patch::SetPlaceholder { target, value } => self.element_mut(target).placeholder = value,
            Patch::SetText { target, text } => self.element_mut(target).text = text,
            Patch::SetAttribute { target, name, value } => {
                self.element_mut(target).attributes.insert(name, value);
            }
            Patch::SetDisabled { target, disabled } => self.element_mut(target).disabled = disabled,
            Patch::SetVisible { target, visible } => self.element_mut(target).visible = visible,
            Patch::SetClass { target, class, on } => {
                let classes = &mut self.element_mut(target).classes;
                if on {
                    classes.insert(class);
                } else {
                    classes.remove(&class);
                }
            }
            Patch::SetData { target, key, value } => {
                self.element_mut(target).dataset.insert(key, value);
            }
            Patch::AppendHtml { target, html } => self.element_mut(target).children.push(html),
            Patch::Alert(message) => self.alerts.push(message),
        }
    }
}
