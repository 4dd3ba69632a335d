//! Checkout routes.

use axum::{Json, extract::State, http::StatusCode};

use crate::error::Result;
use crate::middleware::Identity;
use crate::models::{CustomerInfo, Order};
use crate::state::AppState;

/// `POST /checkout` - submit the current cart as an order.
///
/// Checkout itself needs no authentication; the delivery details in the body
/// identify the customer, exactly as a phone order would.
pub async fn submit(
    State(state): State<AppState>,
    Json(customer): Json<CustomerInfo>,
) -> Result<(StatusCode, Json<Order>)> {
    let order = state.checkout().submit(&customer).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /checkout/profile` - delivery details pre-seeded from the
/// authenticated user's profile. Everything remains editable client-side.
pub async fn profile(Identity(user): Identity) -> Json<CustomerInfo> {
    Json(CustomerInfo {
        name: user.full_name,
        email: user.email.into_inner(),
        phone: String::new(),
        address: String::new(),
        notes: None,
    })
}
