use contracts::domain::a001_user::aggregate::{UserDto, UserRole};
use leptos::prelude::*;
use serde_json::{json, Value};
use thaw::*;

use crate::domain::a001_user::model;
use crate::shared::form_stepper::{
    submit_with, FormStepper, StepContext, StepDef, StepValidationError,
};

pub const STEPPER_ID: &str = "user-create";

/// The server emails an invitation, no password is collected here
pub fn account_payload(email: &str) -> Result<Value, StepValidationError> {
    let email = email.trim();
    let valid_email = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid_email {
        return Err(StepValidationError::new("Enter a valid email"));
    }
    Ok(json!({ "email": email }))
}

pub fn profile_payload(
    first_name: &str,
    last_name: &str,
    phone: &str,
) -> Result<Value, StepValidationError> {
    let (first_name, last_name, phone) = (first_name.trim(), last_name.trim(), phone.trim());
    if first_name.is_empty() || last_name.is_empty() {
        return Err(StepValidationError::new("First and last name are required"));
    }
    Ok(json!({
        "firstName": first_name,
        "lastName": last_name,
        "phone": (!phone.is_empty()).then_some(phone),
    }))
}

pub fn role_payload(role: &str) -> Result<Value, StepValidationError> {
    let role = UserRole::from_key(role).ok_or_else(|| StepValidationError::new("Choose a role"))?;
    Ok(json!({ "role": role.key() }))
}

#[component]
fn AccountStep(ctx: StepContext) -> impl IntoView {
    let email = RwSignal::new(ctx.field("email"));

    ctx.register_submit(move || account_payload(&email.get_untracked()));

    view! {
        <div class="details-form">
            <div class="form-group">
                <label>"Email"</label>
                <Input value=email placeholder="name@example.com" />
            </div>
        </div>
    }
}

#[component]
fn ProfileStep(ctx: StepContext) -> impl IntoView {
    let first_name = RwSignal::new(ctx.field("firstName"));
    let last_name = RwSignal::new(ctx.field("lastName"));
    let phone = RwSignal::new(ctx.field("phone"));

    ctx.register_submit(move || {
        profile_payload(
            &first_name.get_untracked(),
            &last_name.get_untracked(),
            &phone.get_untracked(),
        )
    });

    view! {
        <div class="details-form">
            <div class="form-group">
                <label>"First name"</label>
                <Input value=first_name />
            </div>
            <div class="form-group">
                <label>"Last name"</label>
                <Input value=last_name />
            </div>
            <div class="form-group">
                <label>"Phone"</label>
                <Input value=phone placeholder="Optional" />
            </div>
        </div>
    }
}

#[component]
fn RoleStep(ctx: StepContext) -> impl IntoView {
    let role = RwSignal::new(match ctx.field("role") {
        r if r.is_empty() => UserRole::default().key().to_string(),
        r => r,
    });

    ctx.register_submit(move || role_payload(&role.get_untracked()));

    view! {
        <div class="details-form">
            <div class="form-group">
                <label>"Role"</label>
                <Select value=role>
                    {UserRole::all()
                        .into_iter()
                        .map(|r| view! { <option value=r.key()>{r.label()}</option> })
                        .collect_view()}
                </Select>
            </div>
        </div>
    }
}

pub fn user_steps() -> Vec<StepDef> {
    vec![
        StepDef::new("account", "Account", |ctx| view! { <AccountStep ctx=ctx /> }.into_any()),
        StepDef::new("profile", "Profile", |ctx| view! { <ProfileStep ctx=ctx /> }.into_any()),
        StepDef::new("role", "Role", |ctx| view! { <RoleStep ctx=ctx /> }.into_any()),
    ]
}

#[component]
pub fn UserWizard(on_close: Callback<()>) -> impl IntoView {
    let on_submit = submit_with(|payload: Value| async move {
        let dto: UserDto = match serde_json::from_value(payload) {
            Ok(dto) => dto,
            Err(e) => {
                log::error!("User payload rejected: {}", e);
                return false;
            }
        };
        match model::create(&dto).await {
            Ok(user) => {
                log::info!("Created user {}", user.id);
                true
            }
            Err(e) => {
                log::error!("Failed to create user: {}", e);
                false
            }
        }
    });

    view! {
        <div class="details-container user-wizard" style="padding: 20px;">
            <div class="details-header">
                <h3>"New user"</h3>
            </div>
            <FormStepper
                stepper_id=STEPPER_ID
                steps=user_steps()
                on_submit=on_submit
                on_cancel=on_close
                on_done=on_close
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_payload() {
        assert!(account_payload("ann").is_err());
        assert!(account_payload("@example.com").is_err());
        assert!(account_payload("ann@localhost").is_err());
        assert_eq!(
            account_payload(" ann@example.com ").unwrap(),
            json!({"email": "ann@example.com"})
        );
    }

    #[test]
    fn test_profile_payload() {
        assert!(profile_payload("Ann", " ", "").is_err());
        assert_eq!(
            profile_payload("Ann", "Berg", "").unwrap(),
            json!({"firstName": "Ann", "lastName": "Berg", "phone": null})
        );
    }

    #[test]
    fn test_wizard_payload_builds_dto() {
        let mut merged = serde_json::Map::new();
        for payload in [
            account_payload("ann@example.com").unwrap(),
            profile_payload("Ann", "Berg", "+47 555").unwrap(),
            role_payload("agent").unwrap(),
        ] {
            if let Value::Object(fields) = payload {
                merged.extend(fields);
            }
        }
        let dto: UserDto = serde_json::from_value(Value::Object(merged)).unwrap();
        assert_eq!(dto.role, UserRole::Agent);
        assert_eq!(dto.phone.as_deref(), Some("+47 555"));
        assert_eq!(dto.email, "ann@example.com");
    }
}
