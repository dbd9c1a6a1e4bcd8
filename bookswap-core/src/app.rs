//! Application model: view state, input messages and side effects
//!
//! [`App::update`] is the only place state changes. It never performs I/O;
//! instead it returns [`Effect`]s for the runtime to execute. Each async
//! effect completes by feeding exactly one [`Message`] back into `update`.

use crate::api::ApiResult;
use crate::error::{ImageError, ValidationError};
use crate::form::{DraftId, FieldUpdate, ListingForm, Submission};
use crate::photo::NormalizedPhoto;
use crate::store::ListingStore;
use crate::types::{Listing, ListingId, PhotoFile};
use crate::view::{ContactAction, ListingCard, ListingDetail, PhotoLocator, PLACEHOLDER_PHOTO};
use std::collections::HashSet;

/// Shown when an upload fails for any reason
pub const UPLOAD_FAILED: &str = "Failed to upload book. Please try again.";

/// Shown when a HEIC photo cannot be converted
pub const CONVERSION_FAILED: &str = "Failed to convert HEIC image. Please try a different photo.";

/// Shown when a non-HEIC selection cannot be used as-is
pub const PHOTO_UNREADABLE: &str = "Could not read the selected photo. Please choose a different file.";

/// Whether the initial fetch is still outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
}

/// The modal currently open; at most one at a time
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    None,
    Detail(ListingId),
    Submit(SubmitModal),
}

/// Submission modal state: the draft plus request bookkeeping
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitModal {
    pub form: ListingForm,
    /// A photo conversion is running for this draft
    pub normalizing: bool,
    /// Bumped on every photo selection; only the latest one may attach
    pub selection: u64,
    /// An upload is in flight for this draft
    pub uploading: bool,
}

/// Inputs to the application
#[derive(Debug)]
pub enum Message {
    /// The view was mounted
    Mounted,
    /// Result of the initial fetch
    ListingsFetched(ApiResult<Vec<Listing>>),
    OpenDetail(ListingId),
    OpenSubmit,
    CloseModal,
    /// A form input changed
    Field(FieldUpdate),
    /// The user picked a photo file
    PhotoSelected(PhotoFile),
    /// Result of normalizing a photo for a draft
    PhotoNormalized {
        draft: DraftId,
        selection: u64,
        result: Result<NormalizedPhoto, ImageError>,
    },
    /// The user pressed submit
    Submit,
    /// Result of an upload
    SubmissionFinished {
        draft: DraftId,
        result: ApiResult<Listing>,
    },
    /// "Contact owner" in the detail view
    ContactOwner,
    /// A listing photo failed to load
    PhotoFailed(ListingId),
}

/// Side effects requested by [`App::update`]
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchListings,
    NormalizePhoto {
        draft: DraftId,
        selection: u64,
        file: PhotoFile,
    },
    Upload { draft: DraftId, submission: Submission },
    ComposeEmail { mailto: String },
    CopyToClipboard { text: String },
    /// Blocking notice to the user
    Notify(String),
}

/// The whole client-side state of the listing screen
#[derive(Debug, Clone)]
pub struct App {
    phase: Phase,
    store: ListingStore,
    modal: Modal,
    photos: PhotoLocator,
    failed_photos: HashSet<ListingId>,
}

impl App {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            phase: Phase::Loading,
            store: ListingStore::new(),
            modal: Modal::None,
            photos: PhotoLocator::new(api_base),
            failed_photos: HashSet::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn store(&self) -> &ListingStore {
        &self.store
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    /// The open draft, if the submit modal is showing
    pub fn draft(&self) -> Option<&ListingForm> {
        match &self.modal {
            Modal::Submit(submit) => Some(&submit.form),
            _ => None,
        }
    }

    pub fn submit_modal(&self) -> Option<&SubmitModal> {
        match &self.modal {
            Modal::Submit(submit) => Some(submit),
            _ => None,
        }
    }

    /// Grid cards in store order
    pub fn cards(&self) -> Vec<ListingCard> {
        self.store
            .iter()
            .map(|listing| ListingCard::new(listing, self.photo_url(listing)))
            .collect()
    }

    /// Detail view for the open detail modal
    pub fn detail(&self) -> Option<ListingDetail> {
        match &self.modal {
            Modal::Detail(id) => self
                .store
                .get(id)
                .map(|listing| ListingDetail::new(listing, self.photo_url(listing))),
            _ => None,
        }
    }

    /// Photo URL to render, honouring earlier load failures
    pub fn photo_url(&self, listing: &Listing) -> String {
        if self.failed_photos.contains(&listing.id) {
            PLACEHOLDER_PHOTO.to_string()
        } else {
            self.photos.resolve(listing)
        }
    }

    /// Apply one message and return the effects it requests
    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::Mounted => {
                self.phase = Phase::Loading;
                vec![Effect::FetchListings]
            }

            Message::ListingsFetched(Ok(listings)) => {
                tracing::info!(count = listings.len(), "Listings loaded");
                self.store.replace_all(listings);
                self.phase = Phase::Ready;
                Vec::new()
            }

            Message::ListingsFetched(Err(e)) => {
                // Degrade to an empty grid; no notice
                tracing::warn!("Failed to fetch listings, showing none: {}", e);
                self.store.clear();
                self.phase = Phase::Ready;
                Vec::new()
            }

            Message::OpenDetail(id) => {
                if self.store.get(&id).is_some() {
                    self.modal = Modal::Detail(id);
                } else {
                    tracing::debug!(%id, "Ignoring detail request for unknown listing");
                }
                Vec::new()
            }

            Message::OpenSubmit => {
                self.modal = Modal::Submit(SubmitModal {
                    form: ListingForm::new(),
                    normalizing: false,
                    selection: 0,
                    uploading: false,
                });
                Vec::new()
            }

            Message::CloseModal => {
                self.modal = Modal::None;
                Vec::new()
            }

            Message::Field(update) => {
                if let Modal::Submit(submit) = &mut self.modal {
                    submit.form.apply(update);
                }
                Vec::new()
            }

            Message::PhotoSelected(file) => match &mut self.modal {
                Modal::Submit(submit) => {
                    // The new selection replaces the old one right away
                    submit.form.clear_photo();
                    submit.normalizing = true;
                    submit.selection += 1;
                    vec![Effect::NormalizePhoto {
                        draft: submit.form.id(),
                        selection: submit.selection,
                        file,
                    }]
                }
                _ => Vec::new(),
            },

            Message::PhotoNormalized {
                draft,
                selection,
                result,
            } => {
                let Some(submit) = self.submit_for(draft) else {
                    tracing::debug!(%draft, "Dropping photo for a closed draft");
                    return Vec::new();
                };
                if selection != submit.selection {
                    tracing::debug!(%draft, selection, "Dropping photo for a replaced selection");
                    return Vec::new();
                }
                submit.normalizing = false;
                match result {
                    Ok(photo) => {
                        submit.form.set_photo(photo);
                        Vec::new()
                    }
                    Err(e) => {
                        tracing::warn!(%draft, "Photo conversion failed: {}", e);
                        submit.form.clear_photo();
                        let notice = match e {
                            ImageError::EmptyFile(_) => PHOTO_UNREADABLE,
                            _ => CONVERSION_FAILED,
                        };
                        vec![Effect::Notify(notice.to_string())]
                    }
                }
            }

            Message::Submit => self.submit(),

            Message::SubmissionFinished { draft, result } => self.finish_submission(draft, result),

            Message::ContactOwner => {
                let Some(listing) = self.open_listing() else {
                    return Vec::new();
                };
                match ContactAction::for_listing(listing) {
                    ContactAction::ComposeEmail { mailto } => vec![Effect::ComposeEmail { mailto }],
                    ContactAction::CopyToClipboard { text, notice } => {
                        vec![Effect::CopyToClipboard { text }, Effect::Notify(notice)]
                    }
                }
            }

            Message::PhotoFailed(id) => {
                self.failed_photos.insert(id);
                Vec::new()
            }
        }
    }

    fn submit(&mut self) -> Vec<Effect> {
        let Modal::Submit(submit) = &mut self.modal else {
            return Vec::new();
        };
        if submit.uploading {
            tracing::debug!("Upload already in flight, ignoring submit");
            return Vec::new();
        }

        match submit.form.validate() {
            Ok(submission) => {
                submit.uploading = true;
                tracing::info!(title = %submission.payload.title, "Submitting listing");
                vec![Effect::Upload {
                    draft: submit.form.id(),
                    submission,
                }]
            }
            Err(e) => validation_notice(e),
        }
    }

    fn finish_submission(&mut self, draft: DraftId, result: ApiResult<Listing>) -> Vec<Effect> {
        match result {
            Ok(listing) => {
                tracing::info!(id = %listing.id, "Listing created");
                self.store.prepend(listing);
                // Dismiss the modal only if it still shows this draft
                if self.submit_for(draft).is_some() {
                    self.modal = Modal::None;
                }
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(%draft, "Upload failed: {}", e);
                if let Some(submit) = self.submit_for(draft) {
                    submit.uploading = false;
                }
                vec![Effect::Notify(UPLOAD_FAILED.to_string())]
            }
        }
    }

    fn submit_for(&mut self, draft: DraftId) -> Option<&mut SubmitModal> {
        match &mut self.modal {
            Modal::Submit(submit) if submit.form.id() == draft => Some(submit),
            _ => None,
        }
    }

    fn open_listing(&self) -> Option<&Listing> {
        match &self.modal {
            Modal::Detail(id) => self.store.get(id),
            _ => None,
        }
    }
}

fn validation_notice(error: ValidationError) -> Vec<Effect> {
    tracing::debug!("Submission blocked: {}", error);
    vec![Effect::Notify(error.to_string())]
}
