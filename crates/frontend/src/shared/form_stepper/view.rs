use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thaw::*;

use super::controller::StepperController;
use super::draft_store::LocalStorageDraftStore;
use super::machine::{NextOutcome, PreviousOutcome, StepDescriptor};
use super::step::{run_step_submit, StepContext, StepDef, SubmitFn};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::NOT_FOUND_KEY;

pub type SubmitFuture = Pin<Box<dyn Future<Output = bool>>>;

/// Final submission: receives the aggregated payload, resolves to success
pub type SubmitHandler = Arc<dyn Fn(Value) -> SubmitFuture + Send + Sync>;

pub fn submit_with<F, Fut>(f: F) -> SubmitHandler
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = bool> + 'static,
{
    Arc::new(move |payload| Box::pin(f(payload)))
}

/// Multi-step wizard with a resumable draft.
///
/// The draft is read synchronously on creation, so edit-mode callers should
/// render the stepper only once `initial_data` is loaded.
#[component]
pub fn FormStepper(
    /// Draft key, one draft per id
    #[prop(into)]
    stepper_id: String,
    steps: Vec<StepDef>,
    on_submit: SubmitHandler,
    /// Present in edit mode
    #[prop(default = None)]
    initial_data: Option<Value>,
    #[prop(optional)] on_cancel: Option<Callback<()>>,
    /// Runs after a successful submission
    #[prop(optional)]
    on_done: Option<Callback<()>>,
) -> impl IntoView {
    let descriptors: Vec<StepDescriptor> = steps.iter().map(|s| s.descriptor.clone()).collect();
    let mut initial = StepperController::new(
        stepper_id,
        descriptors.clone(),
        LocalStorageDraftStore::default(),
    );
    initial.mount(initial_data);
    let controller = RwSignal::new(initial);

    let steps = StoredValue::new(steps);
    let on_submit = StoredValue::new(on_submit);
    let submit_slot = StoredValue::new(None::<SubmitFn>);
    let step_error = RwSignal::new(None::<String>);
    let submit_error = RwSignal::new(None::<String>);

    let active_id = Memo::new(move |_| controller.with(|c| c.machine().active_step_id().to_string()));
    let is_first = Memo::new(move |_| controller.with(|c| c.machine().is_first_active()));
    let is_last = Memo::new(move |_| controller.with(|c| c.machine().is_last_active()));
    let submitting = Memo::new(move |_| controller.with(|c| c.is_submitting()));

    if let Some(ctx) = use_context::<AppGlobalContext>() {
        Effect::new(move |_| {
            let stale = controller.with(|c| c.machine().active_step().is_none());
            if stale {
                log::warn!(
                    "Stepper {} has no step {:?}",
                    controller.with_untracked(|c| c.stepper_id().to_string()),
                    active_id.get_untracked()
                );
                ctx.open_tab(NOT_FOUND_KEY, "Not found");
            }
        });
    }

    let current_step =
        move || controller.with_untracked(|c| c.machine().active_step_id().to_string());

    // A step registers its submit when its view is created, so the slot is
    // only cleared when another step is about to render.
    let forget_submit_if_moved = move |before: String| {
        if current_step() != before {
            submit_slot.set_value(None);
        }
    };

    let advance = move |payload: Option<Value>| {
        step_error.set(None);
        submit_error.set(None);
        let before = current_step();

        match controller.try_update(|c| c.advance(payload)).flatten() {
            Some(NextOutcome::Advanced) => forget_submit_if_moved(before),
            Some(NextOutcome::Submit(payload)) => {
                let future = on_submit.with_value(|submit| submit(payload));
                spawn_local(async move {
                    let success = future.await;
                    controller.update(|c| c.finish(success));
                    if success {
                        forget_submit_if_moved(before);
                        if let Some(on_done) = on_done {
                            on_done.run(());
                        }
                    } else {
                        submit_error.set(Some("Submission failed, please try again".to_string()));
                    }
                });
            }
            None => {}
        }
    };

    let go_previous = move || {
        step_error.set(None);
        match controller.try_update(|c| c.previous()) {
            Some(PreviousOutcome::Moved) => submit_slot.set_value(None),
            Some(PreviousOutcome::Abort) => {
                if let Some(on_cancel) = on_cancel {
                    on_cancel.run(());
                }
            }
            None => {}
        }
    };

    let ctx_next = Callback::new(move |payload: Option<Value>| advance(payload));
    let ctx_previous = Callback::new(move |_| go_previous());

    let on_next_click = move |_| {
        if submitting.get_untracked() {
            return;
        }
        match run_step_submit(submit_slot.get_value().as_ref()) {
            Ok(payload) => advance(payload),
            Err(e) => step_error.set(Some(e.to_string())),
        }
    };

    let indicators = descriptors
        .into_iter()
        .enumerate()
        .map(|(index, step)| {
            let id = step.id.clone();
            let id_for_click = step.id.clone();
            let id_for_done = step.id.clone();
            let id_for_lock = step.id.clone();
            view! {
                <button
                    class="form-stepper__indicator"
                    class:form-stepper__indicator--active=move || active_id.get() == id
                    class:form-stepper__indicator--completed=move || {
                        controller.with(|c| c.machine().is_completed(&id_for_done))
                    }
                    disabled=move || !controller.with(|c| c.machine().is_unlocked(&id_for_lock))
                    on:click=move |_| {
                        if controller.try_update(|c| c.select(&id_for_click)).unwrap_or(false) {
                            step_error.set(None);
                            submit_slot.set_value(None);
                        }
                    }
                >
                    <span class="form-stepper__index">{index + 1}</span>
                    <span class="form-stepper__label">{step.label}</span>
                </button>
            }
        })
        .collect_view();

    let body = move || {
        let active = active_id.get();
        steps.with_value(|steps| {
            steps.iter().find(|s| s.descriptor.id == active).map(|step| {
                let step_id = step.descriptor.id.clone();
                let data = Signal::derive(move || {
                    controller.with(|c| c.machine().step_data(&step_id).cloned())
                });
                (step.view)(StepContext::new(data, ctx_next, ctx_previous, submit_slot))
            })
        })
    };

    view! {
        <div class="form-stepper">
            <div class="form-stepper__indicators">{indicators}</div>

            <div class="form-stepper__body">{body}</div>

            {move || step_error.get().map(|e| view! {
                <div class="warning-box">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}
            {move || submit_error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="form-stepper__actions">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| go_previous()
                    disabled=submitting
                >
                    {move || if is_first.get() { "Cancel" } else { "Previous" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=on_next_click
                    disabled=submitting
                >
                    {move || match (is_last.get(), submitting.get()) {
                        (true, true) => "Submitting...",
                        (true, false) => "Submit",
                        _ => "Next",
                    }}
                </Button>
            </div>
        </div>
    }
}
