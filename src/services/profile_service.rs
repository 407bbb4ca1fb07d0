use crate::{
    catalog::CatalogApi,
    dto::profile::{HelperState, ProfileSource, ProfileView, UpdateProfileRequest},
    error::{AppError, AppResult},
    middleware::session::BuyerSession,
    models::BuyerProfile,
    repository::{HelperFlags, ProfileRepository},
    response::{ApiResponse, Meta},
    store::KeyValueStore,
};

/// Remote profile when the buyer has a token and the order service answers,
/// otherwise whatever was cached locally.
pub async fn get_profile<C: CatalogApi>(
    store: &dyn KeyValueStore,
    catalog: &C,
    session: &BuyerSession,
) -> AppResult<ApiResponse<ProfileView>> {
    let profiles = ProfileRepository::new(store);

    if let Some(token) = session.token.as_deref() {
        match catalog.buyer_profile(token).await {
            Ok(remote) => {
                if let Err(err) = profiles
                    .save(&remote)
                    .and_then(|()| profiles.remember_session(token, None))
                {
                    tracing::warn!(error = %err, "profile cache refresh failed");
                }
                return Ok(ApiResponse::success(
                    "OK",
                    ProfileView {
                        profile: remote,
                        source: ProfileSource::Remote,
                    },
                    Some(Meta::empty()),
                ));
            }
            Err(err) => {
                tracing::warn!(error = %err, "remote profile unavailable, using cached fields")
            }
        }
    }

    Ok(ApiResponse::success(
        "OK",
        ProfileView {
            profile: profiles.load(),
            source: ProfileSource::Local,
        },
        Some(Meta::empty()),
    ))
}

fn merge(field: Option<String>, current: Option<String>) -> Option<String> {
    match field {
        Some(value) => Some(value.trim().to_string()).filter(|v| !v.is_empty()),
        None => current,
    }
}

pub fn update_profile(
    store: &dyn KeyValueStore,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<ProfileView>> {
    let profiles = ProfileRepository::new(store);
    let current = profiles.load();
    let profile = BuyerProfile {
        name: merge(payload.name, current.name),
        email: merge(payload.email, current.email),
        phone: merge(payload.phone, current.phone),
        address: merge(payload.address, current.address),
    };
    profiles.save(&profile)?;

    Ok(ApiResponse::success(
        "Profile saved",
        ProfileView {
            profile,
            source: ProfileSource::Local,
        },
        Some(Meta::empty()),
    ))
}

fn valid_helper(helper: &str) -> AppResult<()> {
    if helper.is_empty() || helper.len() > 64 || !helper.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::BadRequest("invalid helper name".into()));
    }
    Ok(())
}

pub fn helper_state(store: &dyn KeyValueStore, helper: &str) -> AppResult<ApiResponse<HelperState>> {
    valid_helper(helper)?;
    let seen = HelperFlags::new(store).has_seen(helper);
    Ok(ApiResponse::success(
        "OK",
        HelperState {
            helper: helper.to_string(),
            seen,
        },
        None,
    ))
}

pub fn mark_helper_seen(
    store: &dyn KeyValueStore,
    helper: &str,
) -> AppResult<ApiResponse<HelperState>> {
    valid_helper(helper)?;
    HelperFlags::new(store).mark_seen(helper)?;
    Ok(ApiResponse::success(
        "OK",
        HelperState {
            helper: helper.to_string(),
            seen: true,
        },
        None,
    ))
}

pub fn reset_helper(store: &dyn KeyValueStore, helper: &str) -> AppResult<ApiResponse<HelperState>> {
    valid_helper(helper)?;
    HelperFlags::new(store).reset(helper)?;
    Ok(ApiResponse::success(
        "OK",
        HelperState {
            helper: helper.to_string(),
            seen: false,
        },
        None,
    ))
}
