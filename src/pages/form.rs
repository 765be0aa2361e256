use tracing::{debug, info};
use crate::config::PageConfig;
use crate::dom::{ElementId, Patch};
use crate::models::InputType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub mode: InputType,
    pub submitting: bool,
}

/// Controller for the index page's URL form.
///
/// Keeps the hidden `analysis_mode` field and the visible copy in step with
/// the `input_type` radios, and puts the page into its loading state when the
/// form is submitted. Submission itself is left to the browser.
pub struct FormController {
    config: PageConfig,
    state: FormState,
}

impl FormController {
    pub fn new(config: PageConfig) -> Self {
        FormController {
            config,
            state: FormState { mode: InputType::Video, submitting: false },
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Sync the page with whichever radio is checked at load time.
    pub fn init(&mut self, checked: InputType) -> Vec<Patch> {
        self.on_mode_change(checked)
    }

    pub fn on_mode_change(&mut self, checked: InputType) -> Vec<Patch> {
        debug!(mode = checked.as_str(), "input type changed");
        self.state.mode = checked;
        let copy = &self.config.copy;

        let mut patches = vec![
            Patch::SetValue {
                target: ElementId::AnalysisModeField,
                value: checked.as_str().to_string(),
            },
            Patch::SetPlaceholder {
                target: ElementId::UrlInput,
                value: copy.placeholder(checked).to_string(),
            },
            Patch::SetValue {
                target: ElementId::SubmitButton,
                value: copy.submit_label(checked).to_string(),
            },
        ];

        patches.extend(InputType::ALL.into_iter().map(|mode| Patch::SetAttribute {
            target: ElementId::ModeLabel(mode),
            name: "aria-selected".to_string(),
            value: (mode == checked).to_string(),
        }));

        patches
    }

    pub fn on_submit(&mut self) -> Vec<Patch> {
        info!(mode = self.state.mode.as_str(), "submitting analysis form");
        self.state.submitting = true;

        vec![
            Patch::SetVisible { target: ElementId::ErrorMessage, visible: false },
            Patch::SetText { target: ElementId::ErrorMessage, text: String::new() },
            Patch::SetClass {
                target: ElementId::LoadingOverlay,
                class: self.config.overlay_class.clone(),
                on: true,
            },
            Patch::SetDisabled { target: ElementId::SubmitButton, disabled: true },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Host, MemoryPage};

    fn label_selected(page: &MemoryPage, mode: InputType) -> Option<String> {
        page.element(&ElementId::ModeLabel(mode))
            .and_then(|e| e.attributes.get("aria-selected").cloned())
    }

    #[test]
    fn test_init_reflects_video_mode() {
        let mut controller = FormController::new(PageConfig::default());
        let mut page = MemoryPage::new();
        page.apply_all(controller.init(InputType::Video));

        assert_eq!(page.element(&ElementId::AnalysisModeField).unwrap().value, "video");
        assert_eq!(page.element(&ElementId::SubmitButton).unwrap().value, "Analyze comments");
        assert!(page.element(&ElementId::UrlInput).unwrap().placeholder.contains("watch?v="));
        assert_eq!(label_selected(&page, InputType::Video).as_deref(), Some("true"));
        assert_eq!(label_selected(&page, InputType::Channel).as_deref(), Some("false"));
    }

    #[test]
    fn test_switch_to_channel() {
        let mut controller = FormController::new(PageConfig::default());
        let mut page = MemoryPage::new();
        page.apply_all(controller.init(InputType::Video));
        page.apply_all(controller.on_mode_change(InputType::Channel));

        assert_eq!(controller.state().mode, InputType::Channel);
        assert_eq!(page.element(&ElementId::AnalysisModeField).unwrap().value, "channel");
        assert_eq!(page.element(&ElementId::SubmitButton).unwrap().value, "Show channel videos");
        assert!(page.element(&ElementId::UrlInput).unwrap().placeholder.contains("@channel"));
        assert_eq!(label_selected(&page, InputType::Channel).as_deref(), Some("true"));
        assert_eq!(label_selected(&page, InputType::Video).as_deref(), Some("false"));
    }

    #[test]
    fn test_submit_clears_error_and_locks_form() {
        let config = PageConfig::default();
        let mut controller = FormController::new(config);
        let mut page = MemoryPage::new();
        page.element_mut(ElementId::ErrorMessage).text = "Invalid video link".to_string();

        page.apply_all(controller.on_submit());

        let error = page.element(&ElementId::ErrorMessage).unwrap();
        assert!(!error.visible);
        assert!(error.text.is_empty());
        assert!(page.has_class(&ElementId::LoadingOverlay, "show"));
        assert!(page.is_disabled(&ElementId::SubmitButton));
        assert!(controller.state().submitting);
    }
}
