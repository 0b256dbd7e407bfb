pub mod steps;

use contracts::domain::a002_property::aggregate::PropertyDto;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;

use self::steps::property_steps;
use crate::domain::a002_property::model;
use crate::shared::form_stepper::{submit_with, FormStepper};

pub fn stepper_id(id: Option<u64>) -> String {
    match id {
        Some(id) => format!("property-edit-{}", id),
        None => "property-create".to_string(),
    }
}

/// Create (`id == None`) or edit wizard. In edit mode the stored property
/// seeds every step.
#[component]
pub fn PropertyWizard(#[prop(optional)] id: Option<u64>, on_close: Callback<()>) -> impl IntoView {
    let initial = RwSignal::new(None::<Value>);
    let loaded = RwSignal::new(id.is_none());
    let (error, set_error) = signal::<Option<String>>(None);

    if let Some(id) = id {
        spawn_local(async move {
            match model::fetch_by_id(id).await {
                Ok(property) => match serde_json::to_value(PropertyDto::from(property)) {
                    Ok(value) => {
                        initial.set(Some(value));
                        loaded.set(true);
                    }
                    Err(e) => set_error.set(Some(e.to_string())),
                },
                Err(e) => {
                    log::error!("Failed to load property {}: {}", id, e);
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    }

    let on_submit = submit_with(move |payload: Value| async move {
        let dto: PropertyDto = match serde_json::from_value(payload) {
            Ok(dto) => dto,
            Err(e) => {
                log::error!("Property payload rejected: {}", e);
                return false;
            }
        };
        let saved = match id {
            Some(id) => model::update(id, &dto).await,
            None => model::create(&dto).await,
        };
        match saved {
            Ok(property) => {
                log::info!("Saved property {}", property.id);
                true
            }
            Err(e) => {
                log::error!("Failed to save property: {}", e);
                false
            }
        }
    });

    view! {
        <div class="details-container property-wizard" style="padding: 20px;">
            <div class="details-header">
                <h3>{if id.is_some() { "Edit property" } else { "New property" }}</h3>
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Show
                when=move || loaded.get()
                fallback=|| view! { <div class="details-loading">"Loading..."</div> }
            >
                <FormStepper
                    stepper_id=stepper_id(id)
                    steps=property_steps()
                    on_submit=on_submit.clone()
                    initial_data=initial.get_untracked()
                    on_cancel=on_close
                    on_done=on_close
                />
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stepper_id() {
        assert_eq!(stepper_id(None), "property-create");
        assert_eq!(stepper_id(Some(7)), "property-edit-7");
    }
}
