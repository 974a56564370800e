//! Onboarding flow controller.
//!
//! Drives resolver → factory → presenter. Every continuation re-runs the
//! resolution from scratch; only the result of the most recently issued
//! request is ever applied, whatever order the resolutions finish in.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

use sn_core::ports::UiQueuePort;
use sn_core::{FlowState, RequestId};

use super::{ContinuationCallback, FlowStateResolver, PresenterPort, ScreenFactory};

/// Called once when the flow reaches [`FlowState::Done`].
pub type CompletionHandler = Box<dyn FnOnce() + Send + 'static>;

/// Controller for one onboarding session.
///
/// Cheap to clone; clones drive the same session.
#[derive(Clone)]
pub struct OnboardingFlowController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    session_id: Uuid,
    resolver: Arc<dyn FlowStateResolver>,
    factory: ScreenFactory,
    presenter: Arc<dyn PresenterPort>,
    ui_queue: Arc<dyn UiQueuePort>,
    runtime: Handle,
    completion: Mutex<Option<CompletionHandler>>,
    /// Id of the most recently issued resolution request.
    latest_request: AtomicU64,
    started: AtomicBool,
    finished: AtomicBool,
    /// Serializes applies when the UI queue runs tasks inline.
    apply_lock: Mutex<()>,
}

impl OnboardingFlowController {
    /// Resolution tasks are spawned on `runtime`; presentation always goes
    /// through `ui_queue`.
    pub fn new(
        resolver: Arc<dyn FlowStateResolver>,
        factory: ScreenFactory,
        presenter: Arc<dyn PresenterPort>,
        ui_queue: Arc<dyn UiQueuePort>,
        runtime: Handle,
        completion: CompletionHandler,
    ) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                session_id: Uuid::new_v4(),
                resolver,
                factory,
                presenter,
                ui_queue,
                runtime,
                completion: Mutex::new(Some(completion)),
                latest_request: AtomicU64::new(0),
                started: AtomicBool::new(false),
                finished: AtomicBool::new(false),
                apply_lock: Mutex::new(()),
            }),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.inner.session_id
    }

    /// Trigger the first resolution. Call exactly once, after the presenter
    /// is attached to something visible.
    pub fn start(&self) -> JoinHandle<()> {
        if self.inner.started.swap(true, Ordering::SeqCst) {
            error!(session = %self.inner.session_id, "onboarding flow started twice, ignoring");
            debug_assert!(false, "OnboardingFlowController::start called twice");
            return self.inner.runtime.spawn(async {});
        }
        info!(session = %self.inner.session_id, "onboarding flow started");
        ControllerInner::request(&self.inner)
    }

    /// Re-run resolution from scratch. Used by every screen continuation.
    ///
    /// The returned handle completes once the resolved state was handed to
    /// the UI queue (or dropped as stale). Awaiting it is optional.
    pub fn request_reevaluation(&self) -> JoinHandle<()> {
        ControllerInner::request(&self.inner)
    }

    /// Return path from a permission-denied screen. Same effect as any
    /// other continuation.
    pub fn recover_from_denied_permission(&self) -> JoinHandle<()> {
        debug!(session = %self.inner.session_id, "unwinding from permission-denied screen");
        self.request_reevaluation()
    }

    /// Continuation bound to this controller, as handed to every screen.
    pub fn continuation(&self) -> ContinuationCallback {
        ControllerInner::continuation(&self.inner)
    }

    /// Apply a resolved state. Must run on the UI queue.
    ///
    /// Results for anything but the latest request are discarded.
    pub fn on_state_resolved(&self, request: RequestId, state: FlowState) {
        ControllerInner::apply(&self.inner, request, state);
    }

    pub fn latest_request(&self) -> RequestId {
        RequestId(self.inner.latest_request.load(Ordering::SeqCst))
    }

    pub fn is_finished(&self) -> bool {
        self.inner.finished.load(Ordering::SeqCst)
    }
}

impl ControllerInner {
    fn request(this: &Arc<Self>) -> JoinHandle<()> {
        let request = RequestId(this.latest_request.fetch_add(1, Ordering::SeqCst) + 1);
        let span = info_span!(
            "onboarding.resolve",
            session = %this.session_id,
            request = %request
        );
        let resolver = Arc::clone(&this.resolver);
        let weak = Arc::downgrade(this);

        this.runtime.spawn(
            async move {
                let state = resolver.resolve().await;
                let Some(inner) = weak.upgrade() else {
                    debug!(%state, "onboarding flow dropped before resolution finished");
                    return;
                };
                debug!(%state, "handing resolved state to ui queue");
                let target = Arc::clone(&inner);
                inner
                    .ui_queue
                    .dispatch(Box::new(move || ControllerInner::apply(&target, request, state)));
            }
            .instrument(span),
        )
    }

    fn continuation(this: &Arc<Self>) -> ContinuationCallback {
        let weak: Weak<Self> = Arc::downgrade(this);
        Arc::new(move || match weak.upgrade() {
            Some(inner) => {
                ControllerInner::request(&inner);
            }
            None => debug!("continuation fired after the onboarding flow was dropped"),
        })
    }

    fn apply(this: &Arc<Self>, request: RequestId, state: FlowState) {
        let _guard = this.apply_lock.lock().unwrap_or_else(PoisonError::into_inner);

        if !this.started.load(Ordering::SeqCst) {
            error!(%request, %state, "resolved state applied before the flow was started");
            debug_assert!(false, "on_state_resolved called before start");
            return;
        }
        if this.finished.load(Ordering::SeqCst) {
            debug!(%request, %state, "onboarding flow already finished, ignoring state");
            return;
        }
        let latest = this.latest_request.load(Ordering::SeqCst);
        if request.0 != latest {
            debug!(%request, latest, %state, "discarding stale resolution");
            return;
        }

        if state.is_terminal() {
            this.finished.store(true, Ordering::SeqCst);
            info!(session = %this.session_id, "onboarding flow complete");
            let completion = this
                .completion
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            if let Some(completion) = completion {
                completion();
            }
            return;
        }

        match this.factory.build(state, ControllerInner::continuation(this)) {
            Ok(screen) => {
                info!(%request, %state, screen = ?screen.kind(), "presenting onboarding screen");
                this.presenter.show_exactly(screen);
            }
            Err(err) => {
                error!(error = %err, "no screen for non-terminal state");
                debug_assert!(false, "screen factory rejected {state}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::onboarding::{ScreenDeps, ScreenDescriptor, ScreenKind};
    use async_trait::async_trait;
    use sn_platform::simulated::{DeviceFacts, InMemoryProgress, SimulatedDevice};
    use sn_platform::ui_queue::ImmediateUiQueue;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;

    struct ScriptedResolver {
        states: Mutex<VecDeque<FlowState>>,
    }

    impl ScriptedResolver {
        fn new(states: impl IntoIterator<Item = FlowState>) -> Arc<Self> {
            Arc::new(Self {
                states: Mutex::new(states.into_iter().collect()),
            })
        }
    }

    #[async_trait]
    impl FlowStateResolver for ScriptedResolver {
        async fn resolve(&self) -> FlowState {
            self.states
                .lock()
                .unwrap()
                .pop_front()
                .expect("resolver script exhausted")
        }
    }

    #[derive(Default)]
    struct RecordingPresenter {
        shown: Mutex<Vec<ScreenKind>>,
    }

    impl RecordingPresenter {
        fn shown(&self) -> Vec<ScreenKind> {
            self.shown.lock().unwrap().clone()
        }
    }

    impl PresenterPort for RecordingPresenter {
        fn show_exactly(&self, screen: ScreenDescriptor) {
            self.shown.lock().unwrap().push(screen.kind());
        }
    }

    fn factory() -> ScreenFactory {
        let device = Arc::new(SimulatedDevice::new(DeviceFacts::default()));
        ScreenFactory::new(ScreenDeps {
            progress: Arc::new(InMemoryProgress::default()),
            authorization: device.clone(),
            remote_notifications: device.clone(),
            nursery: device.clone(),
            settings: device,
            ui_queue: Arc::new(ImmediateUiQueue),
        })
    }

    fn controller(
        resolver: Arc<dyn FlowStateResolver>,
        presenter: Arc<RecordingPresenter>,
    ) -> (OnboardingFlowController, Arc<AtomicUsize>) {
        let completed = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&completed);
        let controller = OnboardingFlowController::new(
            resolver,
            factory(),
            presenter,
            Arc::new(ImmediateUiQueue),
            Handle::current(),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        (controller, completed)
    }

    #[tokio::test]
    async fn first_resolution_decides_the_first_screen() {
        let presenter = Arc::new(RecordingPresenter::default());
        let (controller, completed) =
            controller(ScriptedResolver::new([FlowState::Permissions]), presenter.clone());

        controller.start().await.unwrap();

        assert_eq!(presenter.shown(), vec![ScreenKind::Permissions]);
        assert_eq!(completed.load(Ordering::SeqCst), 0);
        assert_eq!(controller.latest_request(), RequestId(1));
    }

    #[tokio::test]
    async fn done_completes_once_and_presents_nothing_more() {
        let presenter = Arc::new(RecordingPresenter::default());
        let (controller, completed) = controller(
            ScriptedResolver::new([FlowState::Done, FlowState::Initial]),
            presenter.clone(),
        );

        controller.start().await.unwrap();
        controller.request_reevaluation().await.unwrap();

        assert!(controller.is_finished());
        assert_eq!(completed.load(Ordering::SeqCst), 1);
        assert!(presenter.shown().is_empty());
    }

    #[tokio::test]
    async fn stale_request_ids_are_discarded() {
        let presenter = Arc::new(RecordingPresenter::default());
        let (controller, _) =
            controller(ScriptedResolver::new([FlowState::Initial]), presenter.clone());
        controller.start().await.unwrap();

        controller.on_state_resolved(RequestId(0), FlowState::BluetoothOff);

        assert_eq!(presenter.shown(), vec![ScreenKind::StartNow]);
    }

    #[tokio::test]
    async fn recovery_unwind_reevaluates_like_a_continuation() {
        let presenter = Arc::new(RecordingPresenter::default());
        let (controller, _) = controller(
            ScriptedResolver::new([FlowState::BluetoothDenied, FlowState::BluetoothDenied]),
            presenter.clone(),
        );

        controller.start().await.unwrap();
        controller.recover_from_denied_permission().await.unwrap();

        assert_eq!(
            presenter.shown(),
            vec![ScreenKind::BluetoothDenied, ScreenKind::BluetoothDenied]
        );
        assert_eq!(controller.latest_request(), RequestId(2));
    }

    #[tokio::test]
    async fn continuation_after_drop_is_a_no_op() {
        let presenter = Arc::new(RecordingPresenter::default());
        let (controller, _) =
            controller(ScriptedResolver::new([FlowState::Initial]), presenter.clone());
        let continuation = controller.continuation();

        drop(controller);
        continuation();

        assert!(presenter.shown().is_empty());
    }

    #[cfg(debug_assertions)]
    #[tokio::test]
    #[should_panic(expected = "before start")]
    async fn applying_before_start_fails_fast() {
        let presenter = Arc::new(RecordingPresenter::default());
        let (controller, _) = controller(ScriptedResolver::new([]), presenter);

        controller.on_state_resolved(RequestId(0), FlowState::Initial);
    }

    #[cfg(debug_assertions)]
    #[tokio::test]
    #[should_panic(expected = "called twice")]
    async fn starting_twice_fails_fast() {
        let presenter = Arc::new(RecordingPresenter::default());
        let (controller, _) = controller(
            ScriptedResolver::new([FlowState::Initial, FlowState::Initial]),
            presenter,
        );

        controller.start().await.unwrap();
        let _ = controller.start();
    }

    #[cfg(not(debug_assertions))]
    #[tokio::test]
    async fn starting_twice_issues_no_second_resolution() {
        let presenter = Arc::new(RecordingPresenter::default());
        let (controller, _) = controller(
            ScriptedResolver::new([FlowState::Initial, FlowState::PartialPostcode]),
            presenter.clone(),
        );

        controller.start().await.unwrap();
        controller.start().await.unwrap();

        assert_eq!(controller.latest_request(), RequestId(1));
        assert_eq!(presenter.shown(), vec![ScreenKind::StartNow]);
    }
}
