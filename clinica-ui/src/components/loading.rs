//! Loading Component
//!
//! Spinner and skeleton states.

use leptos::*;

/// Centered loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12">
            <div class="loading-spinner w-8 h-8" />
        </div>
    }
}

/// Skeleton loader for table rows
#[component]
pub fn TableSkeleton(#[prop(default = 5)] rows: usize) -> impl IntoView {
    view! {
        <div class="space-y-3 animate-pulse">
            <div class="bg-gray-700 rounded h-10 w-full" />
            {(0..rows).map(|_| view! {
                <div class="bg-gray-800 rounded h-8" />
            }).collect_view()}
        </div>
    }
}
