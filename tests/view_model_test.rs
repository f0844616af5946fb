//! Tests for the game screen state holder.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::Poll;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use futures::channel::mpsc;
use futures::stream;
use tictactoe_client::tui::{Action, App};
use tictactoe_client::{
    Board, Cell, Direction, GameState, GameViewModel, MakeTurn, Mark, MessagingError,
    MessagingErrorKind, RealtimeMessagingClient, StateStream,
};
use tokio::time::timeout;

type Item = Result<GameState, MessagingError>;

/// In-memory channel: snapshots come from a test-held sender, sends and
/// closes are recorded.
struct FakeClient {
    items: Mutex<Option<mpsc::UnboundedReceiver<Item>>>,
    sent: Mutex<Vec<MakeTurn>>,
    closes: AtomicUsize,
}

impl FakeClient {
    fn new() -> (Arc<Self>, mpsc::UnboundedSender<Item>) {
        let (tx, rx) = mpsc::unbounded();
        let client = Arc::new(Self {
            items: Mutex::new(Some(rx)),
            sent: Mutex::new(Vec::new()),
            closes: AtomicUsize::new(0),
        });
        (client, tx)
    }

    fn sent(&self) -> Vec<MakeTurn> {
        self.sent.lock().expect("Lock poisoned").clone()
    }

    fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RealtimeMessagingClient for FakeClient {
    fn state_stream(&self) -> StateStream {
        match self.items.lock().expect("Lock poisoned").take() {
            Some(rx) => rx.boxed(),
            None => stream::empty().boxed(),
        }
    }

    async fn send_action(&self, turn: MakeTurn) -> Result<(), MessagingError> {
        self.sent.lock().expect("Lock poisoned").push(turn);
        Ok(())
    }

    async fn close(&self) -> Result<(), MessagingError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Channel whose first stream poll blocks while it opens a session, like a
/// connect that is still in progress when the screen closes.
#[derive(Default)]
struct SlowConnectClient {
    connecting: Arc<AtomicBool>,
    session_open: Arc<AtomicBool>,
    closes: AtomicUsize,
}

impl SlowConnectClient {
    fn session_open(&self) -> bool {
        self.session_open.load(Ordering::SeqCst)
    }

    async fn wait_until_connecting(&self) {
        timeout(Duration::from_secs(1), async {
            while !self.connecting.load(Ordering::SeqCst) {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("Stream polled in time");
    }
}

#[async_trait]
impl RealtimeMessagingClient for SlowConnectClient {
    fn state_stream(&self) -> StateStream {
        let connecting = Arc::clone(&self.connecting);
        let session_open = Arc::clone(&self.session_open);
        let mut opened = false;
        stream::poll_fn(move |_| -> Poll<Option<Item>> {
            if !opened {
                opened = true;
                connecting.store(true, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(300));
                session_open.store(true, Ordering::SeqCst);
            }
            Poll::Pending
        })
        .boxed()
    }

    async fn send_action(&self, _turn: MakeTurn) -> Result<(), MessagingError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), MessagingError> {
        self.session_open.store(false, Ordering::SeqCst);
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn center_x() -> GameState {
    let mut board = Board::new();
    board.set(Cell::CENTER, Some(Mark::X));
    GameState::new(board, vec![Mark::X, Mark::O], Some(Mark::O), None)
}

fn won_by_x() -> GameState {
    let mut board = Board::new();
    for column in 0..3 {
        board.set(Cell::new(column, 0).expect("On board"), Some(Mark::X));
    }
    GameState::new(board, vec![Mark::X, Mark::O], None, Some(Mark::X))
}

/// Activates a view model and waits until it has mirrored `game`.
async fn screen_with(game: GameState) -> (GameViewModel, Arc<FakeClient>, mpsc::UnboundedSender<Item>) {
    let (fake, tx) = FakeClient::new();
    let view_model = GameViewModel::activate(fake.clone());
    let mut changes = view_model.subscribe();
    tx.unbounded_send(Ok(game)).expect("Receiver alive");
    timeout(Duration::from_secs(1), changes.changed())
        .await
        .expect("Snapshot mirrored in time")
        .expect("Sender alive");
    (view_model, fake, tx)
}

#[tokio::test]
async fn test_starts_connecting() {
    let (fake, _tx) = FakeClient::new();
    let view_model = GameViewModel::activate(fake);

    let state = view_model.state();
    assert!(*state.is_connecting());
    assert!(!*state.show_connection_error());
}

#[tokio::test]
async fn test_snapshot_updates_state_once_and_clears_connecting() {
    let (fake, tx) = FakeClient::new();
    let view_model = GameViewModel::activate(fake);
    let mut changes = view_model.subscribe();

    tx.unbounded_send(Ok(center_x())).expect("Receiver alive");
    timeout(Duration::from_secs(1), changes.changed())
        .await
        .expect("Changed in time")
        .expect("Sender alive");

    let state = changes.borrow_and_update().clone();
    assert_eq!(state.game(), &center_x());
    assert!(!*state.is_connecting());
    assert!(!*state.show_connection_error());

    // Ending the stream must not publish another change before the task exits.
    drop(tx);
    let next = timeout(Duration::from_secs(1), changes.changed())
        .await
        .expect("Task finished in time");
    assert!(next.is_err(), "No further update expected");
    assert_eq!(view_model.state().game(), &center_x());
}

#[tokio::test]
async fn test_stream_failure_sets_error_flag() {
    let (fake, tx) = FakeClient::new();
    let view_model = GameViewModel::activate(fake);
    let mut changes = view_model.subscribe();

    tx.unbounded_send(Err(MessagingError::new(MessagingErrorKind::Connect, "refused")))
        .expect("Receiver alive");
    timeout(Duration::from_secs(1), changes.changed())
        .await
        .expect("Changed in time")
        .expect("Sender alive");

    let state = view_model.state();
    assert!(!*state.is_connecting());
    assert!(*state.show_connection_error());
    assert_eq!(state.game(), &GameState::default());
}

#[tokio::test]
async fn test_stream_end_without_snapshot_clears_connecting() {
    let (fake, tx) = FakeClient::new();
    let view_model = GameViewModel::activate(fake);
    let mut changes = view_model.subscribe();

    drop(tx);
    timeout(Duration::from_secs(1), changes.changed())
        .await
        .expect("Changed in time")
        .expect("Sender alive");

    let state = view_model.state();
    assert!(!*state.is_connecting());
    assert!(!*state.show_connection_error());
}

#[tokio::test]
async fn test_tap_empty_cell_sends_one_request() {
    let (view_model, fake, _tx) = screen_with(center_x()).await;

    assert!(view_model.finish_turn(2, 0).await);
    assert_eq!(fake.sent(), vec![MakeTurn::new(2, 0)]);
}

#[tokio::test]
async fn test_tap_occupied_cell_sends_nothing() {
    let (view_model, fake, _tx) = screen_with(center_x()).await;

    assert!(!view_model.finish_turn(1, 1).await);
    assert!(fake.sent().is_empty());
}

#[tokio::test]
async fn test_tap_after_win_sends_nothing() {
    let (view_model, fake, _tx) = screen_with(won_by_x()).await;

    assert!(!view_model.finish_turn(1, 1).await);
    assert!(!view_model.finish_turn(0, 2).await);
    assert!(fake.sent().is_empty());
}

#[tokio::test]
async fn test_tap_off_board_sends_nothing() {
    let (view_model, fake, _tx) = screen_with(center_x()).await;

    assert!(!view_model.finish_turn(3, 0).await);
    assert!(!view_model.finish_turn(0, 7).await);
    assert!(fake.sent().is_empty());
}

#[tokio::test]
async fn test_close_closes_once_and_stops_sends() {
    let (mut view_model, fake, _tx) = screen_with(center_x()).await;

    view_model.close().await;
    view_model.close().await;
    assert!(view_model.is_closed());
    assert_eq!(fake.closes(), 1);

    assert!(!view_model.finish_turn(0, 0).await);
    assert!(fake.sent().is_empty());

    drop(view_model);
    tokio::task::yield_now().await;
    assert_eq!(fake.closes(), 1);
}

#[tokio::test]
async fn test_drop_closes_channel() {
    let (view_model, fake, _tx) = screen_with(center_x()).await;

    drop(view_model);
    timeout(Duration::from_secs(1), async {
        while fake.closes() == 0 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("Closed in time");
    assert_eq!(fake.closes(), 1);
}

#[tokio::test]
async fn test_app_taps_cursor_cell() {
    let (view_model, fake, _tx) = screen_with(center_x()).await;
    let mut app = App::new(view_model);
    assert_eq!(app.cursor(), Cell::CENTER);

    // Center is taken.
    app.apply(Action::TapCursor).await;
    assert!(fake.sent().is_empty());

    app.apply(Action::MoveCursor(Direction::Right)).await;
    app.apply(Action::TapCursor).await;
    assert_eq!(fake.sent(), vec![MakeTurn::new(2, 1)]);

    app.apply(Action::Tap(Cell::new(0, 2).expect("On board"))).await;
    assert_eq!(app.cursor(), Cell::new(0, 2).expect("On board"));
    assert_eq!(fake.sent(), vec![MakeTurn::new(2, 1), MakeTurn::new(0, 2)]);

    app.apply(Action::Quit).await;
    assert!(app.should_quit());
    app.shutdown().await;
    assert_eq!(fake.closes(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_close_waits_for_in_flight_connect() {
    let slow = Arc::new(SlowConnectClient::default());
    let mut view_model = GameViewModel::activate(slow.clone());
    slow.wait_until_connecting().await;

    view_model.close().await;
    assert!(!slow.session_open(), "Session opened after close returned");

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(!slow.session_open());
    assert_eq!(slow.closes.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_drop_during_connect_closes_session() {
    let slow = Arc::new(SlowConnectClient::default());
    let view_model = GameViewModel::activate(slow.clone());
    slow.wait_until_connecting().await;

    drop(view_model);
    timeout(Duration::from_secs(2), async {
        while slow.closes.load(Ordering::SeqCst) == 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("Closed in time");
    assert!(!slow.session_open());
}
