use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
    /// Session restore finished (successfully or not)
    pub resolved: bool,
}

/// Auth context provider component
///
/// Tokens are issued elsewhere; this only restores the session from
/// localStorage and loads the current user's permissions.
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let auth_state = RwSignal::new(AuthState::default());

    Effect::new(move |_| {
        spawn_local(async move {
            let restored = restore_session().await;
            auth_state.set(match restored {
                Some((access_token, user_info)) => AuthState {
                    access_token: Some(access_token),
                    user_info: Some(user_info),
                    resolved: true,
                },
                None => AuthState {
                    resolved: true,
                    ..Default::default()
                },
            });
        });
    });

    provide_context(auth_state);

    children()
}

async fn restore_session() -> Option<(String, UserInfo)> {
    let access_token = storage::get_access_token()?;

    match api::get_current_user(&access_token).await {
        Ok(user_info) => return Some((access_token, user_info)),
        Err(e) => log::warn!("Stored access token rejected: {}", e),
    }

    // Token invalid, try refresh
    let Some(refresh_token) = storage::get_refresh_token() else {
        storage::clear_tokens();
        return None;
    };
    match api::refresh_token(refresh_token).await {
        Ok(response) => {
            storage::save_access_token(&response.access_token);
            match api::get_current_user(&response.access_token).await {
                Ok(user_info) => Some((response.access_token, user_info)),
                Err(e) => {
                    log::error!("Failed to load current user after refresh: {}", e);
                    None
                }
            }
        }
        Err(e) => {
            log::warn!("Token refresh failed: {}", e);
            storage::clear_tokens();
            None
        }
    }
}

/// Drops the stored tokens; the session guard falls back to its sign-in notice
pub fn sign_out(auth_state: RwSignal<AuthState>) {
    storage::clear_tokens();
    auth_state.set(AuthState {
        resolved: true,
        ..Default::default()
    });
    log::info!("Signed out");
}

/// Hook to access auth state
pub fn use_auth() -> RwSignal<AuthState> {
    use_context::<RwSignal<AuthState>>().expect("AuthProvider not found in component tree")
}
