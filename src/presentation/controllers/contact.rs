//! Public contact form and booking-intent leads

use axum::{extract::State, http::StatusCode, response::Json};

use crate::application::{ContactMessage, errors::ApplicationError};
use crate::domain::{BookingContact, NewBookingContact};
use crate::presentation::controllers::AppState;
use crate::presentation::extractors::{ApiPath, ValidatedJson};
use crate::presentation::models::{
    BookingContactRequest, BookingContactResponse, ContactRequest, ContactResponse,
    ErrorResponse, ListResponse, MessageResponse, StatusUpdateRequest,
};

/// Acknowledge a contact-form message. The message is logged, not stored.
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message received", body = ContactResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
pub async fn submit_contact(
    State(app_state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ContactRequest>,
) -> Result<Json<ContactResponse>, ApplicationError> {
    let message = ContactMessage {
        name: request.name,
        email: request.email,
        subject: request.subject,
        message: request.message,
    };
    app_state.contact_service.submit_message(&message).await?;

    Ok(Json(ContactResponse {
        success: true,
        message: "Contact message received successfully. We will get back to you soon!"
            .to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/bookings/contacts",
    tag = "contact",
    request_body = BookingContactRequest,
    responses(
        (status = 201, description = "Lead saved", body = BookingContactResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse)
    )
)]
pub async fn create_booking_contact(
    State(app_state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BookingContactRequest>,
) -> Result<(StatusCode, Json<BookingContactResponse>), ApplicationError> {
    let (Some(name), Some(email), Some(phone), Some(booking_date)) = (
        request.name,
        request.email,
        request.phone,
        request.booking_date,
    ) else {
        return Err(ApplicationError::validation(
            "All fields (name, email, phone, booking_date) are required.",
        ));
    };

    let contact = app_state
        .contact_service
        .capture_lead(&NewBookingContact {
            name,
            email,
            phone,
            booking_date,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingContactResponse {
            message: "Booking contact saved successfully.".to_string(),
            contact,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/bookings/contacts/all",
    tag = "contact",
    responses(
        (status = 200, description = "All leads, newest first", body = ListResponse<BookingContact>)
    )
)]
pub async fn list_booking_contacts(
    State(app_state): State<AppState>,
) -> Result<Json<ListResponse<BookingContact>>, ApplicationError> {
    let contacts = app_state.contact_service.list_leads().await?;
    Ok(Json(contacts.into()))
}

#[utoipa::path(
    patch,
    path = "/api/bookings/contacts/{id}/status",
    tag = "contact",
    params(("id" = i64, Path, description = "Lead ID")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Lead status changed", body = MessageResponse),
        (status = 400, description = "Invalid status", body = ErrorResponse),
        (status = 404, description = "Lead not found", body = ErrorResponse)
    )
)]
pub async fn update_booking_contact_status(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<StatusUpdateRequest>,
) -> Result<Json<MessageResponse>, ApplicationError> {
    let status = request.status.parse()?;
    app_state
        .contact_service
        .update_lead_status(id, status)
        .await?;
    Ok(Json(MessageResponse::new("Status updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/bookings/contacts/{id}",
    tag = "contact",
    params(("id" = i64, Path, description = "Lead ID")),
    responses(
        (status = 200, description = "Lead deleted", body = MessageResponse),
        (status = 404, description = "Lead not found", body = ErrorResponse)
    )
)]
pub async fn delete_booking_contact(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApplicationError> {
    app_state.contact_service.delete_lead(id).await?;
    Ok(Json(MessageResponse::new(
        "Booking contact deleted successfully",
    )))
}
