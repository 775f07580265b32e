//! HTTP handlers for drafting sessions.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    Json,
};
use futures::stream::{self, Stream, StreamExt};
use serde::Serialize;
use tokio::sync::{mpsc, oneshot, OwnedMutexGuard};

use super::dto::{
    CreateSessionResponse, DraftView, ErrorResponse, FragmentEvent, GenerateForm, HealthResponse,
    ListModelsRequest, ModelsResponse, ReviseSectionRequest, SectionView, StreamQuery,
};
use super::error::ProposalApiError;
use crate::application::handlers::proposal::{ChannelProgress, NoProgress};
use crate::application::{
    AnnouncementSource, DraftingSettings, ExportProposalHandler, GenerateProposalCommand,
    GenerateProposalHandler, ListModelsHandler, ListModelsQuery, ProposalError,
    ReviseSectionCommand, ReviseSectionHandler,
};
use crate::domain::foundation::{SessionId, ValidationError};
use crate::domain::proposal::{ProposalDraft, ProviderKind};
use crate::ports::{DocumentExtractor, DraftSessionStore, ProviderFactory, ProviderSelection};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ProposalAppState {
    pub provider_factory: Arc<dyn ProviderFactory>,
    pub extractor: Arc<dyn DocumentExtractor>,
    pub sessions: Arc<dyn DraftSessionStore>,
    pub settings: DraftingSettings,
}

impl ProposalAppState {
    pub fn new(
        provider_factory: Arc<dyn ProviderFactory>,
        extractor: Arc<dyn DocumentExtractor>,
        sessions: Arc<dyn DraftSessionStore>,
        settings: DraftingSettings,
    ) -> Self {
        Self {
            provider_factory,
            extractor,
            sessions,
            settings,
        }
    }

    pub fn list_models_handler(&self) -> ListModelsHandler {
        ListModelsHandler::new(self.provider_factory.clone())
    }

    pub fn generate_handler(&self) -> GenerateProposalHandler {
        GenerateProposalHandler::new(
            self.provider_factory.clone(),
            self.extractor.clone(),
            self.settings.clone(),
        )
    }

    pub fn revise_handler(&self) -> ReviseSectionHandler {
        ReviseSectionHandler::new(self.provider_factory.clone(), self.settings.clone())
    }

    pub fn export_handler(&self) -> ExportProposalHandler {
        ExportProposalHandler::new(&self.settings)
    }

    /// Takes exclusive hold of a session's draft for the length of one action.
    async fn acquire(&self, id: SessionId) -> Result<OwnedMutexGuard<ProposalDraft>, ProposalApiError> {
        let draft = self
            .sessions
            .get(&id)
            .await
            .ok_or(ProposalApiError::SessionNotFound(id))?;
        draft.try_lock_owned().map_err(|_| ProposalApiError::SessionBusy)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// POST /api/sessions - Start a drafting session
pub async fn create_session(State(state): State<ProposalAppState>) -> Response {
    let session_id = state.sessions.create().await;
    (StatusCode::CREATED, Json(CreateSessionResponse { session_id })).into_response()
}

/// GET /api/sessions/:id - Current draft
pub async fn get_session(
    State(state): State<ProposalAppState>,
    Path(session_id): Path<String>,
) -> Result<Json<DraftView>, ProposalApiError> {
    let session_id = parse_session_id(&session_id)?;
    let draft = state.acquire(session_id).await?;
    Ok(Json(DraftView::new(session_id, &draft)))
}

/// DELETE /api/sessions/:id - End a session
pub async fn delete_session(
    State(state): State<ProposalAppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ProposalApiError> {
    let session_id = parse_session_id(&session_id)?;
    if state.sessions.remove(&session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ProposalApiError::SessionNotFound(session_id))
    }
}

/// POST /api/providers/:provider/models - Check a key and list its models
pub async fn list_models(
    State(state): State<ProposalAppState>,
    Path(provider): Path<String>,
    body: Option<Json<ListModelsRequest>>,
) -> Result<Json<ModelsResponse>, ProposalApiError> {
    let provider = parse_provider(Some(provider))?;
    let api_key = body.and_then(|Json(req)| req.api_key);
    let selection = ProviderSelection::new(provider).with_api_key(api_key);

    let models = state
        .list_models_handler()
        .handle(ListModelsQuery::new(selection))
        .await?;
    Ok(Json(ModelsResponse { provider, models }))
}

/// POST /api/sessions/:id/generate - Draft a proposal (multipart form)
pub async fn generate_proposal(
    State(state): State<ProposalAppState>,
    Path(session_id): Path<String>,
    Query(query): Query<StreamQuery>,
    multipart: Multipart,
) -> Result<Response, ProposalApiError> {
    let session_id = parse_session_id(&session_id)?;
    let mut draft = state.acquire(session_id).await?;
    let form = read_generate_form(multipart).await?;

    let announcement = match (form.announcement_pdf, form.announcement_text) {
        (Some(pdf), _) if !pdf.is_empty() => AnnouncementSource::Pdf(pdf),
        (_, text) => AnnouncementSource::Text(text.unwrap_or_default()),
    };
    let cmd = GenerateProposalCommand {
        session_id,
        selection: selection(form.provider, form.model, form.api_key)?,
        instruction: form.instruction,
        announcement,
        company_info: form.company_info,
    };
    let handler = state.generate_handler();

    if query.stream {
        return Ok(stream_action(move |progress| async move {
            handler.handle(cmd, &mut draft, &progress).await?;
            Ok(DraftView::new(session_id, &draft))
        })
        .into_response());
    }

    handler.handle(cmd, &mut draft, &NoProgress).await?;
    Ok(Json(DraftView::new(session_id, &draft)).into_response())
}

/// POST /api/sessions/:id/sections/:index/revise - Rewrite one section
pub async fn revise_section(
    State(state): State<ProposalAppState>,
    Path((session_id, index)): Path<(String, String)>,
    Query(query): Query<StreamQuery>,
    payload: Result<Json<ReviseSectionRequest>, JsonRejection>,
) -> Result<Response, ProposalApiError> {
    let session_id = parse_session_id(&session_id)?;
    let section_index = index
        .parse::<usize>()
        .map_err(|_| ProposalApiError::BadRequest(format!("Invalid section index: {}", index)))?;
    let Json(req) = payload.map_err(|e| ProposalApiError::BadRequest(e.body_text()))?;
    let mut draft = state.acquire(session_id).await?;

    let cmd = ReviseSectionCommand {
        session_id,
        selection: selection(Some(req.provider), Some(req.model), req.api_key)?,
        instruction: req.instruction,
        section_index,
        feedback: req.feedback,
    };
    let handler = state.revise_handler();

    if query.stream {
        return Ok(stream_action(move |progress| async move {
            let section = handler.handle(cmd, &mut draft, &progress).await?;
            Ok(SectionView::from(&section))
        })
        .into_response());
    }

    let section = handler.handle(cmd, &mut draft, &NoProgress).await?;
    Ok(Json(SectionView::from(&section)).into_response())
}

/// GET /api/sessions/:id/export - Download the proposal as markdown
pub async fn export_proposal(
    State(state): State<ProposalAppState>,
    Path(session_id): Path<String>,
) -> Result<Response, ProposalApiError> {
    let session_id = parse_session_id(&session_id)?;
    let draft = state.acquire(session_id).await?;
    let exported = state.export_handler().handle(&draft)?;

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                format!("{}; charset=utf-8", exported.content_type),
            ),
            (header::CONTENT_DISPOSITION, exported.content_disposition()),
        ],
        exported.content,
    )
        .into_response())
}

// ════════════════════════════════════════════════════════════════════════════
// Streaming
// ════════════════════════════════════════════════════════════════════════════

/// Runs a drafting action on its own task and relays it as SSE.
///
/// Emits one `fragment` event per piece of model output, then exactly one
/// `complete` or `error` event. The task owns the session lock, so a client
/// that disconnects early does not abort the action or lose its result.
fn stream_action<F, Fut, T>(action: F) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    F: FnOnce(ChannelProgress) -> Fut,
    Fut: std::future::Future<Output = Result<T, ProposalError>> + Send + 'static,
    T: Serialize + Send + 'static,
{
    let (fragment_tx, fragment_rx) = mpsc::unbounded_channel::<String>();
    let (done_tx, done_rx) = oneshot::channel::<Event>();
    let task = action(ChannelProgress::new(fragment_tx));

    tokio::spawn(async move {
        let event = match task.await {
            Ok(result) => json_event("complete", &result),
            Err(err) => {
                let err = ProposalApiError::from(err);
                tracing::warn!(error = %err, "Streamed drafting action failed");
                json_event("error", &err.body())
            }
        };
        let _ = done_tx.send(event);
    });

    let fragments = stream::unfold(fragment_rx, |mut rx| async move {
        rx.recv().await.map(|delta| (delta, rx))
    })
    .map(|delta| json_event("fragment", &FragmentEvent { delta }));

    let finished = stream::once(async move {
        done_rx.await.unwrap_or_else(|_| {
            json_event(
                "error",
                &ErrorResponse::new("INTERNAL_ERROR", "Drafting task ended unexpectedly"),
            )
        })
    });

    Sse::new(fragments.chain(finished).map(Ok)).keep_alive(KeepAlive::default())
}

fn json_event<T: Serialize>(name: &str, payload: &T) -> Event {
    Event::default()
        .event(name)
        .json_data(payload)
        .unwrap_or_else(|_| Event::default().event("error").data("unserializable event"))
}

// ════════════════════════════════════════════════════════════════════════════
// Input parsing
// ════════════════════════════════════════════════════════════════════════════

fn parse_session_id(raw: &str) -> Result<SessionId, ProposalApiError> {
    raw.parse::<SessionId>()
        .map_err(|_| ProposalApiError::BadRequest(format!("Invalid session ID: {}", raw)))
}

fn parse_provider(raw: Option<String>) -> Result<ProviderKind, ProposalError> {
    let raw = raw
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| ValidationError::empty_field("provider"))?;
    Ok(raw.parse::<ProviderKind>()?)
}

fn selection(
    provider: Option<String>,
    model: Option<String>,
    api_key: Option<String>,
) -> Result<ProviderSelection, ProposalError> {
    let mut selection = ProviderSelection::new(parse_provider(provider)?).with_api_key(api_key);
    if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
        selection = selection.with_model(model.trim());
    }
    Ok(selection)
}

async fn read_generate_form(mut multipart: Multipart) -> Result<GenerateForm, ProposalApiError> {
    let bad = |e: axum::extract::multipart::MultipartError| ProposalApiError::BadRequest(e.body_text());
    let mut form = GenerateForm::default();

    while let Some(field) = multipart.next_field().await.map_err(bad)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "announcement" => form.announcement_pdf = Some(field.bytes().await.map_err(bad)?.to_vec()),
            "announcement_text" => form.announcement_text = Some(field.text().await.map_err(bad)?),
            "company_info" => form.company_info = field.text().await.map_err(bad)?,
            "provider" => form.provider = Some(field.text().await.map_err(bad)?),
            "model" => form.model = Some(field.text().await.map_err(bad)?),
            "api_key" => form.api_key = Some(field.text().await.map_err(bad)?),
            "instruction" => form.instruction = Some(field.text().await.map_err(bad)?),
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(form)
}
