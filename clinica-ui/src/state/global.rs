//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Whether a token is stored
    pub signed_in: RwSignal<bool>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
    /// Collapsed sidebar
    pub sidebar_collapsed: RwSignal<bool>,
}

/// Provide global state to the component tree
pub fn provide_global_state(signed_in: bool) {
    let state = GlobalState {
        signed_in: create_rw_signal(signed_in),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
        sidebar_collapsed: create_rw_signal(false),
    };

    provide_context(state);
}

pub fn use_global_state() -> GlobalState {
    use_context::<GlobalState>().expect("GlobalState not found")
}

impl GlobalState {
    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }

    pub fn toggle_sidebar(&self) {
        self.sidebar_collapsed.update(|collapsed| *collapsed = !*collapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_signed_in_follows_initial_token_and_sign_out() {
        let runtime = create_runtime();

        provide_global_state(true);
        let state = use_global_state();
        assert!(state.signed_in.get_untracked());

        state.signed_in.set(false);
        assert!(!use_global_state().signed_in.get_untracked());

        runtime.dispose();
    }

    #[wasm_bindgen_test]
    fn test_toggle_sidebar() {
        let runtime = create_runtime();

        provide_global_state(false);
        let state = use_global_state();
        state.toggle_sidebar();
        assert!(state.sidebar_collapsed.get_untracked());
        state.toggle_sidebar();
        assert!(!state.sidebar_collapsed.get_untracked());

        runtime.dispose();
    }
}
