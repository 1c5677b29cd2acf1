use anyhow::Result;
use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::{AbortHandle, JoinHandle};

use super::clock::Clock;
use super::document::{Document, PopupId};
use super::state::{Effect, Input, Session, SessionToken, State};
use crate::github::{FetchRepoInfo, RepoInfo};
use crate::link::{ElementId, HoverTarget, LinkMatcher};
use crate::position::place;
use crate::render::render;
use crate::settings::{Settings, SettingsStore};

/// Events delivered by the host page.
#[derive(Debug, Clone, PartialEq)]
pub enum HoverEvent {
    PointerEnter(HoverTarget),
    PointerLeave(ElementId),
    PointerEnterPopup,
    PointerLeavePopup,
    SettingsChanged(Settings),
}

/// Drives a [`Session`] against a document.
///
/// Constructed once per page load. [`HoverController::run`] consumes host
/// events until the event channel closes, then tears the session down.
pub struct HoverController<D: Document, F: FetchRepoInfo + 'static, C: Clock> {
    session: Session,
    matcher: LinkMatcher,
    document: D,
    fetcher: Arc<F>,
    clock: C,
    popup: Option<PopupId>,
    debounce: Option<AbortHandle>,
    grace: Option<AbortHandle>,
    inputs_tx: mpsc::UnboundedSender<Input>,
    inputs_rx: Option<mpsc::UnboundedReceiver<Input>>,
}

impl<D: Document, F: FetchRepoInfo + 'static, C: Clock> HoverController<D, F, C> {
    pub fn new(
        document: D,
        fetcher: Arc<F>,
        clock: C,
        matcher: LinkMatcher,
        settings: &Settings,
    ) -> Self {
        let (inputs_tx, inputs_rx) = mpsc::unbounded_channel();
        Self {
            session: Session::new(settings),
            matcher,
            document,
            fetcher,
            clock,
            popup: None,
            debounce: None,
            grace: None,
            inputs_tx,
            inputs_rx: Some(inputs_rx),
        }
    }

    /// Reads the initial settings; an unreadable store means defaults.
    #[tracing::instrument(skip_all)]
    pub async fn start(
        document: D,
        fetcher: Arc<F>,
        clock: C,
        matcher: LinkMatcher,
        store: &dyn SettingsStore,
    ) -> Self {
        let settings = match store.load().await {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Could not read settings, using defaults: {:#}", e);
                Settings::default()
            }
        };
        Self::new(document, fetcher, clock, matcher, &settings)
    }

    pub fn state(&self) -> &State {
        self.session.state()
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn handle_event(&mut self, event: HoverEvent) {
        let input = match event {
            HoverEvent::PointerEnter(target) => match self.matcher.candidate_identity(&target) {
                Some(repo) => Input::EnterLink {
                    target: target.id,
                    repo,
                },
                None => return,
            },
            HoverEvent::PointerLeave(target) => Input::LeaveLink { target },
            HoverEvent::PointerEnterPopup => Input::EnterPopup,
            HoverEvent::PointerLeavePopup => Input::LeavePopup,
            HoverEvent::SettingsChanged(settings) => {
                debug!("Settings changed, enabled = {}", settings.enabled);
                self.session.apply_settings(&settings);
                return;
            }
        };
        self.dispatch(input);
    }

    fn dispatch(&mut self, input: Input) {
        for effect in self.session.step(input) {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::ScheduleDebounce { token, delay } => {
                cancel(&mut self.debounce);
                self.debounce = Some(self.schedule(delay, Input::DebounceElapsed { token }));
            }
            Effect::CancelDebounce => cancel(&mut self.debounce),
            Effect::StartFetch { token, repo } => {
                let fetcher = Arc::clone(&self.fetcher);
                let tx = self.inputs_tx.clone();
                // In-flight fetches are never aborted; a stale token drops the result.
                tokio::spawn(async move {
                    let info = fetcher.fetch_repo_info(&repo).await;
                    let _ = tx.send(Input::FetchResolved { token, info });
                });
            }
            Effect::ShowPopup {
                token,
                target,
                info,
            } => self.show(token, target, &info),
            Effect::RetirePopup => self.retire_popup(),
            Effect::ScheduleGrace { token, delay } => {
                cancel(&mut self.grace);
                self.grace = Some(self.schedule(delay, Input::GraceElapsed { token }));
            }
            Effect::CancelGrace => cancel(&mut self.grace),
        }
    }

    fn schedule(&self, delay: Duration, input: Input) -> AbortHandle {
        let tx = self.inputs_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(input);
        })
        .abort_handle()
    }

    fn show(&mut self, token: SessionToken, target: ElementId, info: &RepoInfo) {
        self.retire_popup();

        let element = render(info, self.clock.now());
        let popup = match self.document.append_hidden(&element) {
            Ok(popup) => popup,
            Err(e) => {
                warn!("Could not attach popup for {}: {:#}", info.full_name, e);
                self.dispatch(Input::ShowFailed { token });
                return;
            }
        };
        self.popup = Some(popup);

        if let Err(e) = self.position(popup, target) {
            warn!("Could not place popup for {}: {:#}", info.full_name, e);
            self.dispatch(Input::ShowFailed { token });
        }
    }

    /// Measures the hidden popup and reveals it at its clamped position.
    fn position(&mut self, popup: PopupId, target: ElementId) -> Result<()> {
        let size = self.document.popup_size(popup)?;
        let rect = self.document.element_rect(target)?;
        let placement = place(rect, size, self.document.viewport());
        debug!("Placing popup at {:?}", placement);
        self.document.reveal_at(popup, placement)
    }

    fn retire_popup(&mut self) {
        if let Some(popup) = self.popup.take() {
            self.document.remove(popup);
        }
    }

    /// Cancels timers and retires the popup.
    pub fn shutdown(&mut self) {
        for effect in self.session.reset() {
            self.apply(effect);
        }
    }

    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<HoverEvent>) -> Self {
        let Some(mut inputs) = self.inputs_rx.take() else {
            return self;
        };

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => break,
                },
                Some(input) = inputs.recv() => self.dispatch(input),
            }
        }

        debug!("Event source closed, tearing down hover session");
        self.shutdown();
        self.inputs_rx = Some(inputs);
        self
    }
}

fn cancel(handle: &mut Option<AbortHandle>) {
    if let Some(handle) = handle.take() {
        handle.abort();
    }
}

/// Pushes settings changes into the controller's event stream.
pub fn forward_settings(
    mut settings: watch::Receiver<Settings>,
    events: mpsc::UnboundedSender<HoverEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while settings.changed().await.is_ok() {
            let current = settings.borrow_and_update().clone();
            if events.send(HoverEvent::SettingsChanged(current)).is_err() {
                break;
            }
        }
    })
}
