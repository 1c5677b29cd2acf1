//! The hover session state machine.
//!
//! [`Session::step`] is a pure transition function: it consumes an [`Input`],
//! moves to the next [`State`] and returns the [`Effect`]s the driver must
//! carry out. Timers and fetches carry the [`SessionToken`] they were started
//! under; inputs with a stale token are dropped.

use log::debug;
use std::time::Duration;

use crate::github::{RepoIdentity, RepoInfo};
use crate::link::ElementId;
use crate::settings::Settings;

/// Wait before retiring a popup the pointer has left.
pub const GRACE_DELAY: Duration = Duration::from_millis(100);

pub type SessionToken = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverFlags {
    pub over_link: bool,
    pub over_popup: bool,
}

impl HoverFlags {
    fn is_hovered(&self) -> bool {
        self.over_link || self.over_popup
    }
}

/// The link a session is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Active {
    pub target: ElementId,
    pub repo: RepoIdentity,
    pub token: SessionToken,
    pub flags: HoverFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Idle,
    /// Debounce timer running.
    Pending(Active),
    /// Fetch in flight.
    Loading(Active),
    /// Popup attached.
    Shown(Active),
}

impl State {
    pub fn active(&self) -> Option<&Active> {
        match self {
            State::Idle => None,
            State::Pending(a) | State::Loading(a) | State::Shown(a) => Some(a),
        }
    }

    fn active_mut(&mut self) -> Option<&mut Active> {
        match self {
            State::Idle => None,
            State::Pending(a) | State::Loading(a) | State::Shown(a) => Some(a),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            State::Idle => "idle",
            State::Pending(_) => "pending",
            State::Loading(_) => "loading",
            State::Shown(_) => "shown",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// The pointer entered a link that passed the link matcher.
    EnterLink { target: ElementId, repo: RepoIdentity },
    LeaveLink { target: ElementId },
    EnterPopup,
    LeavePopup,
    DebounceElapsed { token: SessionToken },
    FetchResolved {
        token: SessionToken,
        info: Option<RepoInfo>,
    },
    GraceElapsed { token: SessionToken },
    /// The document refused to attach or place the popup.
    ShowFailed { token: SessionToken },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ScheduleDebounce {
        token: SessionToken,
        delay: Duration,
    },
    CancelDebounce,
    StartFetch {
        token: SessionToken,
        repo: RepoIdentity,
    },
    /// Render, attach hidden, position and reveal.
    ShowPopup {
        token: SessionToken,
        target: ElementId,
        info: RepoInfo,
    },
    RetirePopup,
    ScheduleGrace {
        token: SessionToken,
        delay: Duration,
    },
    CancelGrace,
}

/// One hover session per page. Owns the state and the token counter.
#[derive(Debug)]
pub struct Session {
    state: State,
    enabled: bool,
    delay: Duration,
    last_token: SessionToken,
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: State::Idle,
            enabled: settings.enabled,
            delay: settings.popup_delay(),
            last_token: 0,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Applies pushed settings. A popup that is already shown stays up.
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.enabled = settings.enabled;
        self.delay = settings.popup_delay();
    }

    fn next_token(&mut self) -> SessionToken {
        self.last_token += 1;
        self.last_token
    }

    pub fn step(&mut self, input: Input) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (next, effects) = self.transition(state, input);
        self.state = next;
        effects
    }

    /// Drops the session: cancels timers and retires any popup.
    pub fn reset(&mut self) -> Vec<Effect> {
        self.state = State::Idle;
        vec![Effect::CancelDebounce, Effect::CancelGrace, Effect::RetirePopup]
    }

    fn transition(&mut self, state: State, input: Input) -> (State, Vec<Effect>) {
        match (state, input) {
            (state, Input::EnterLink { target, repo }) => self.enter_link(state, target, repo),

            (mut state, Input::LeaveLink { target }) => {
                let mut effects = Vec::new();
                let shown = matches!(state, State::Shown(_));
                if let Some(active) = state.active_mut() {
                    if active.target == target {
                        active.flags.over_link = false;
                        if shown && !active.flags.is_hovered() {
                            effects.push(Effect::ScheduleGrace {
                                token: active.token,
                                delay: GRACE_DELAY,
                            });
                        }
                    }
                }
                (state, effects)
            }

            (State::Shown(mut active), Input::EnterPopup) => {
                active.flags.over_popup = true;
                (State::Shown(active), vec![Effect::CancelGrace])
            }

            (State::Shown(mut active), Input::LeavePopup) => {
                active.flags.over_popup = false;
                let effects = if active.flags.is_hovered() {
                    vec![]
                } else {
                    vec![Effect::ScheduleGrace {
                        token: active.token,
                        delay: GRACE_DELAY,
                    }]
                };
                (State::Shown(active), effects)
            }

            (State::Pending(active), Input::DebounceElapsed { token }) if active.token == token => {
                let effects = vec![Effect::StartFetch {
                    token,
                    repo: active.repo.clone(),
                }];
                (State::Loading(active), effects)
            }

            (State::Loading(active), Input::FetchResolved { token, info })
                if active.token == token =>
            {
                match info {
                    None => {
                        debug!("No info for {}, staying quiet", active.repo);
                        (State::Idle, vec![])
                    }
                    Some(info) => {
                        let mut effects = vec![
                            Effect::RetirePopup,
                            Effect::ShowPopup {
                                token,
                                target: active.target,
                                info,
                            },
                        ];
                        // The pointer may have moved away while the fetch ran.
                        if !active.flags.is_hovered() {
                            effects.push(Effect::ScheduleGrace {
                                token,
                                delay: GRACE_DELAY,
                            });
                        }
                        (State::Shown(active), effects)
                    }
                }
            }

            (State::Shown(active), Input::GraceElapsed { token }) if active.token == token => {
                if active.flags.is_hovered() {
                    (State::Shown(active), vec![])
                } else {
                    (State::Idle, vec![Effect::RetirePopup])
                }
            }

            (State::Shown(active), Input::ShowFailed { token }) if active.token == token => {
                (State::Idle, vec![Effect::CancelGrace, Effect::RetirePopup])
            }

            (state, input) => {
                debug!("Ignoring {:?} in state {}", input, state.name());
                (state, vec![])
            }
        }
    }

    fn enter_link(
        &mut self,
        mut state: State,
        target: ElementId,
        repo: RepoIdentity,
    ) -> (State, Vec<Effect>) {
        if let Some(active) = state.active_mut() {
            if active.target == target {
                active.flags.over_link = true;
                return (state, vec![]);
            }
        }

        if !self.enabled {
            debug!("Previews disabled, ignoring hover over {}", repo);
            return (state, vec![]);
        }

        let mut effects = Vec::new();
        match state {
            State::Idle => {}
            State::Pending(_) | State::Loading(_) => effects.push(Effect::CancelDebounce),
            State::Shown(_) => {
                effects.push(Effect::CancelDebounce);
                effects.push(Effect::CancelGrace);
                effects.push(Effect::RetirePopup);
            }
        }

        let token = self.next_token();
        effects.push(Effect::ScheduleDebounce {
            token,
            delay: self.delay,
        });
        let active = Active {
            target,
            repo,
            token,
            flags: HoverFlags {
                over_link: true,
                over_popup: false,
            },
        };
        (State::Pending(active), effects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{NO_DESCRIPTION, Visibility};

    const LINK_A: ElementId = ElementId(1);
    const LINK_B: ElementId = ElementId(2);

    fn repo(name: &str) -> RepoIdentity {
        RepoIdentity {
            owner: "octo".to_string(),
            name: name.to_string(),
        }
    }

    fn info(name: &str) -> RepoInfo {
        RepoInfo {
            full_name: format!("octo/{}", name),
            description: NO_DESCRIPTION.to_string(),
            stars: 3,
            forks: 1,
            primary_language: None,
            author_login: "octo".to_string(),
            author_avatar_url: String::new(),
            last_pushed_at: None,
            visibility: Visibility::Public,
        }
    }

    fn enter(target: ElementId, name: &str) -> Input {
        Input::EnterLink {
            target,
            repo: repo(name),
        }
    }

    fn session() -> Session {
        Session::new(&Settings::default())
    }

    /// Drives a session to `Shown` for LINK_A and returns its token.
    fn shown_session() -> (Session, SessionToken) {
        let mut session = session();
        session.step(enter(LINK_A, "a"));
        let token = session.state().active().unwrap().token;
        session.step(Input::DebounceElapsed { token });
        session.step(Input::FetchResolved {
            token,
            info: Some(info("a")),
        });
        assert!(matches!(session.state(), State::Shown(_)));
        (session, token)
    }

    #[test]
    fn test_idle_enter_schedules_debounce() {
        let mut session = session();

        let effects = session.step(enter(LINK_A, "a"));

        assert_eq!(
            effects,
            vec![Effect::ScheduleDebounce {
                token: 1,
                delay: Duration::from_millis(100),
            }]
        );
        assert!(matches!(session.state(), State::Pending(a) if a.target == LINK_A));
    }

    #[test]
    fn test_configured_delay_is_used() {
        let mut session = Session::new(&Settings {
            popup_delay_millis: 400,
            ..Default::default()
        });

        let effects = session.step(enter(LINK_A, "a"));

        assert_eq!(
            effects,
            vec![Effect::ScheduleDebounce {
                token: 1,
                delay: Duration::from_millis(400),
            }]
        );
    }

    #[test]
    fn test_reentering_same_target_is_noop() {
        let mut session = session();
        session.step(enter(LINK_A, "a"));
        let before = session.state().clone();

        assert!(session.step(enter(LINK_A, "a")).is_empty());
        assert_eq!(session.state(), &before);

        session.step(Input::DebounceElapsed { token: 1 });
        assert!(session.step(enter(LINK_A, "a")).is_empty());
        assert!(matches!(session.state(), State::Loading(_)));
    }

    #[test]
    fn test_debounce_starts_fetch() {
        let mut session = session();
        session.step(enter(LINK_A, "a"));

        let effects = session.step(Input::DebounceElapsed { token: 1 });

        assert_eq!(
            effects,
            vec![Effect::StartFetch {
                token: 1,
                repo: repo("a"),
            }]
        );
        assert!(matches!(session.state(), State::Loading(_)));
    }

    #[test]
    fn test_stale_debounce_is_ignored() {
        let mut session = session();
        session.step(enter(LINK_A, "a"));
        session.step(enter(LINK_B, "b"));

        assert!(session.step(Input::DebounceElapsed { token: 1 }).is_empty());
        assert!(matches!(session.state(), State::Pending(a) if a.token == 2));
    }

    #[test]
    fn test_fetch_none_returns_to_idle() {
        let mut session = session();
        session.step(enter(LINK_A, "a"));
        session.step(Input::DebounceElapsed { token: 1 });

        let effects = session.step(Input::FetchResolved { token: 1, info: None });

        assert!(effects.is_empty());
        assert_eq!(session.state(), &State::Idle);
    }

    #[test]
    fn test_fetch_some_shows_popup_after_retiring_stale_one() {
        let mut session = session();
        session.step(enter(LINK_A, "a"));
        session.step(Input::DebounceElapsed { token: 1 });

        let effects = session.step(Input::FetchResolved {
            token: 1,
            info: Some(info("a")),
        });

        assert_eq!(
            effects,
            vec![
                Effect::RetirePopup,
                Effect::ShowPopup {
                    token: 1,
                    target: LINK_A,
                    info: info("a"),
                },
            ]
        );
        assert!(matches!(session.state(), State::Shown(_)));
    }

    #[test]
    fn test_stale_fetch_result_is_ignored() {
        let mut session = session();
        session.step(enter(LINK_A, "a"));
        session.step(Input::DebounceElapsed { token: 1 });
        session.step(enter(LINK_B, "b"));

        let effects = session.step(Input::FetchResolved {
            token: 1,
            info: Some(info("a")),
        });

        assert!(effects.is_empty());
        assert!(matches!(session.state(), State::Pending(a) if a.target == LINK_B));
    }

    #[test]
    fn test_entering_other_link_while_shown_retires_popup() {
        let (mut session, _) = shown_session();

        let effects = session.step(enter(LINK_B, "b"));

        assert_eq!(
            effects,
            vec![
                Effect::CancelDebounce,
                Effect::CancelGrace,
                Effect::RetirePopup,
                Effect::ScheduleDebounce {
                    token: 2,
                    delay: Duration::from_millis(100),
                },
            ]
        );
        assert!(matches!(session.state(), State::Pending(a) if a.target == LINK_B));
    }

    #[test]
    fn test_entering_other_link_while_pending_cancels_timer() {
        let mut session = session();
        session.step(enter(LINK_A, "a"));

        let effects = session.step(enter(LINK_B, "b"));

        assert_eq!(
            effects,
            vec![
                Effect::CancelDebounce,
                Effect::ScheduleDebounce {
                    token: 2,
                    delay: Duration::from_millis(100),
                },
            ]
        );
    }

    #[test]
    fn test_leave_link_schedules_grace_then_retires() {
        let (mut session, token) = shown_session();

        let effects = session.step(Input::LeaveLink { target: LINK_A });
        assert_eq!(
            effects,
            vec![Effect::ScheduleGrace {
                token,
                delay: GRACE_DELAY,
            }]
        );

        let effects = session.step(Input::GraceElapsed { token });
        assert_eq!(effects, vec![Effect::RetirePopup]);
        assert_eq!(session.state(), &State::Idle);
    }

    #[test]
    fn test_pointer_over_popup_suppresses_retirement() {
        let (mut session, token) = shown_session();

        session.step(Input::LeaveLink { target: LINK_A });
        assert_eq!(session.step(Input::EnterPopup), vec![Effect::CancelGrace]);

        assert!(session.step(Input::GraceElapsed { token }).is_empty());
        assert!(matches!(session.state(), State::Shown(_)));

        let effects = session.step(Input::LeavePopup);
        assert_eq!(
            effects,
            vec![Effect::ScheduleGrace {
                token,
                delay: GRACE_DELAY,
            }]
        );
        assert_eq!(
            session.step(Input::GraceElapsed { token }),
            vec![Effect::RetirePopup]
        );
    }

    #[test]
    fn test_back_on_link_before_grace_keeps_popup() {
        let (mut session, token) = shown_session();

        session.step(Input::LeaveLink { target: LINK_A });
        session.step(enter(LINK_A, "a"));

        assert!(session.step(Input::GraceElapsed { token }).is_empty());
        assert!(matches!(session.state(), State::Shown(_)));
    }

    #[test]
    fn test_leaving_popup_while_on_link_keeps_popup() {
        let (mut session, _) = shown_session();

        session.step(Input::EnterPopup);
        assert!(session.step(Input::LeavePopup).is_empty());
    }

    #[test]
    fn test_leave_other_link_is_ignored() {
        let (mut session, _) = shown_session();

        assert!(session.step(Input::LeaveLink { target: LINK_B }).is_empty());
        assert!(session.state().active().unwrap().flags.over_link);
    }

    #[test]
    fn test_leaving_before_fetch_completes_schedules_grace_on_show() {
        let mut session = session();
        session.step(enter(LINK_A, "a"));
        session.step(Input::DebounceElapsed { token: 1 });
        assert!(session.step(Input::LeaveLink { target: LINK_A }).is_empty());

        let effects = session.step(Input::FetchResolved {
            token: 1,
            info: Some(info("a")),
        });

        assert_eq!(
            effects.last(),
            Some(&Effect::ScheduleGrace {
                token: 1,
                delay: GRACE_DELAY,
            })
        );
    }

    #[test]
    fn test_disabled_prevents_new_pending() {
        let mut session = session();
        session.apply_settings(&Settings {
            enabled: false,
            ..Default::default()
        });

        assert!(session.step(enter(LINK_A, "a")).is_empty());
        assert_eq!(session.state(), &State::Idle);
    }

    #[test]
    fn test_disabling_leaves_shown_popup_alone() {
        let (mut session, _) = shown_session();

        session.apply_settings(&Settings {
            enabled: false,
            ..Default::default()
        });

        assert!(matches!(session.state(), State::Shown(_)));
        assert!(session.step(enter(LINK_B, "b")).is_empty());
        assert!(matches!(session.state(), State::Shown(_)));
    }

    #[test]
    fn test_show_failure_returns_to_idle() {
        let (mut session, token) = shown_session();

        let effects = session.step(Input::ShowFailed { token });

        assert_eq!(effects, vec![Effect::CancelGrace, Effect::RetirePopup]);
        assert_eq!(session.state(), &State::Idle);
    }

    #[test]
    fn test_popup_events_outside_shown_are_ignored() {
        let mut session = session();
        assert!(session.step(Input::EnterPopup).is_empty());
        assert!(session.step(Input::LeavePopup).is_empty());
        assert!(session.step(Input::GraceElapsed { token: 7 }).is_empty());
        assert_eq!(session.state(), &State::Idle);
    }

    #[test]
    fn test_reset() {
        let (mut session, _) = shown_session();

        let effects = session.reset();

        assert_eq!(
            effects,
            vec![Effect::CancelDebounce, Effect::CancelGrace, Effect::RetirePopup]
        );
        assert_eq!(session.state(), &State::Idle);
    }

    #[test]
    fn test_tokens_increase_monotonically() {
        let mut session = session();
        session.step(enter(LINK_A, "a"));
        session.step(enter(LINK_B, "b"));
        session.step(enter(LINK_A, "a"));

        assert_eq!(session.state().active().unwrap().token, 3);
    }
}
