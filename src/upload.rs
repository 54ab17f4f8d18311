//! Image upload endpoint for the post creation form.
//!
//! Each uploaded file is stored one at a time. A failure aborts the rest of
//! the batch but keeps the images stored so far: the response still carries a
//! preview fragment per success, plus an out-of-band alert explaining why the
//! batch stopped.

use axum::{
    extract::{FromRef, Multipart, State, multipart::Field},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{AppState, Error, alert::Alert, storage::ImageStore};

/// The state needed for storing uploaded images.
#[derive(Debug, Clone)]
pub struct UploadEndpointState {
    pub image_store: ImageStore,
}

impl FromRef<AppState> for UploadEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            image_store: state.image_store.clone(),
        }
    }
}

/// A preview tile for one uploaded image.
///
/// Carries a hidden `image_urls` input so the post creation form submits the
/// stored URL, and a remove button that drops the tile (and with it the
/// hidden input) from the form.
pub(crate) fn image_preview_view(url: &str) -> Markup {
    html! {
        div class="relative inline-block m-1"
        {
            input type="hidden" name="image_urls" value=(url);

            img
                src=(url)
                alt="Attached image"
                class="h-24 w-24 object-cover rounded border border-gray-300 dark:border-gray-600";

            button
                type="button"
                onclick="this.parentElement.remove()"
                aria-label="Remove image"
                class="absolute top-0 right-0 px-1.5 bg-gray-900/70 text-white rounded-bl rounded-tr"
            {
                "✕"
            }
        }
    }
}

/// Route handler for uploading one or more images.
///
/// Files are stored in order. If one file fails, the remaining files are
/// skipped, but previews for the files stored before the failure are still
/// returned so the client keeps its partial progress.
pub async fn upload_images(
    State(state): State<UploadEndpointState>,
    mut multipart: Multipart,
) -> Response {
    let mut previews: Vec<Markup> = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(error) => {
                tracing::error!("Could not read multipart form field: {error}");
                return abort_batch(
                    previews,
                    &Error::MultipartError(error.to_string()),
                );
            }
        };

        match store_image_field(field, &state.image_store).await {
            Ok(url) => previews.push(image_preview_view(&url)),
            Err(error) => {
                tracing::error!("Image upload failed: {error}");
                return abort_batch(previews, &error);
            }
        }
    }

    render_previews(previews).into_response()
}

async fn store_image_field(field: Field<'_>, image_store: &ImageStore) -> Result<String, Error> {
    let is_image = field
        .content_type()
        .is_some_and(|content_type| content_type.starts_with("image/"));

    if !is_image {
        return Err(Error::NotAnImage);
    }

    let file_name = field
        .file_name()
        .map(|file_name| file_name.to_owned())
        .ok_or_else(|| {
            Error::MultipartError("Could not get file name from multipart form field".to_owned())
        })?;

    let data = field
        .bytes()
        .await
        .map_err(|error| Error::MultipartError(error.to_string()))?;

    tracing::debug!("Received file '{}' that is {} bytes", file_name, data.len());

    image_store.store(&file_name, &data)
}

fn render_previews(previews: Vec<Markup>) -> Markup {
    html! {
        @for preview in previews {
            (preview)
        }
    }
}

/// Build the partial-success response: previews for the stored images plus an
/// out-of-band alert explaining why the rest of the batch was skipped.
///
/// The response is 200 so that the client swaps in the partial successes.
fn abort_batch(previews: Vec<Markup>, error: &Error) -> Response {
    let alert = match error {
        Error::NotAnImage => Alert::Error {
            message: "Upload stopped".to_owned(),
            details: "One of the files is not an image. Images before it were kept; \
                re-attach the rest."
                .to_owned(),
        },
        error => Alert::Error {
            message: "Upload stopped".to_owned(),
            details: format!(
                "{error}. Images before the failure were kept. Check that the media bucket \
                directory exists and is writable."
            ),
        },
    };

    html! {
        (render_previews(previews))
        (alert.into_html())
    }
    .into_response()
}
