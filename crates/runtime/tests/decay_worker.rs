use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use pet_core::PetStats;
use runtime::repository::{CommitFence, StatUpdate};
use runtime::{
    DecayConfig, DecayEvent, InMemoryStore, NewUser, Pet, PetRepository, RepositoryError, Runtime,
    RuntimeConfig, RuntimeEvent, Store, Topic, User, UserId, UserRepository,
};
use tokio::sync::broadcast;

const WAIT: Duration = Duration::from_secs(5);

fn decay_every(period_ms: u64, amount: u32) -> RuntimeConfig {
    RuntimeConfig {
        decay: DecayConfig {
            enabled: true,
            period: Duration::from_millis(period_ms),
            amount,
        },
        bcrypt_cost: 4,
        ..RuntimeConfig::default()
    }
}

async fn start(store: Arc<dyn Store>, config: RuntimeConfig) -> Runtime {
    Runtime::builder()
        .config(config)
        .shared_store(store)
        .jwt_secret("decay-secret")
        .build()
        .await
        .expect("runtime should build")
}

fn seed(store: &InMemoryStore, username: &str, stats: PetStats) -> User {
    store
        .create(&NewUser::new(username, "hash").with_stats(stats))
        .expect("seed user")
}

async fn next_decay(rx: &mut broadcast::Receiver<RuntimeEvent>) -> DecayEvent {
    loop {
        let event = tokio::time::timeout(WAIT, rx.recv())
            .await
            .expect("decay event should arrive")
            .expect("bus should stay open");
        if let RuntimeEvent::Decay(event) = event {
            return event;
        }
    }
}

#[tokio::test]
async fn sweep_decays_every_pet_uniformly() {
    let store = Arc::new(InMemoryStore::new());
    let a = seed(&store, "alice", PetStats::new(50, 60, 70).unwrap());
    let b = seed(&store, "bob", PetStats::new(2, 100, 4).unwrap());

    let runtime = start(store.clone(), decay_every(20, 4)).await;
    let mut rx = runtime.subscribe(Topic::Decay);

    match next_decay(&mut rx).await {
        DecayEvent::Swept { pets, amount } => {
            assert_eq!(pets, 2);
            assert_eq!(amount, 4);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    runtime.shutdown().await.unwrap();

    // Exactly one or more whole sweeps happened; every field moved in step.
    let a = store.load(a.id).unwrap().unwrap().stats;
    let b = store.load(b.id).unwrap().unwrap().stats;
    let sweeps = u32::from(50 - a.hunger()) / 4;
    assert!(sweeps >= 1);
    assert_eq!(u32::from(60 - a.happiness()), sweeps * 4);
    assert_eq!(u32::from(70 - a.energy()), sweeps * 4);
    assert_eq!(b.hunger(), 0);
    assert_eq!(u32::from(100 - b.happiness()), sweeps * 4);
    assert_eq!(b.energy(), 0);
}

#[tokio::test]
async fn repeated_sweeps_bottom_out_at_zero() {
    let store = Arc::new(InMemoryStore::new());
    let user = seed(&store, "alice", PetStats::new(10, 5, 9).unwrap());

    let runtime = start(store.clone(), decay_every(10, 4)).await;
    let mut rx = runtime.subscribe(Topic::Decay);
    for _ in 0..4 {
        next_decay(&mut rx).await;
    }
    let metrics = runtime.decay_metrics();
    runtime.shutdown().await.unwrap();

    let stats = store.load(user.id).unwrap().unwrap().stats;
    assert!(stats.is_depleted());
    assert!(metrics.sweeps() >= 4);
    assert_eq!(metrics.failed(), 0);
}

#[tokio::test]
async fn disabled_worker_never_sweeps() {
    let store = Arc::new(InMemoryStore::new());
    let user = seed(&store, "alice", PetStats::initial());

    let config = RuntimeConfig {
        decay: DecayConfig {
            enabled: false,
            period: Duration::from_millis(10),
            amount: 4,
        },
        ..RuntimeConfig::default()
    };
    let runtime = start(store.clone(), config).await;
    let mut rx = runtime.subscribe(Topic::Decay);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(matches!(
        rx.try_recv(),
        Err(broadcast::error::TryRecvError::Empty)
    ));
    assert_eq!(runtime.decay_metrics().sweeps(), 0);
    runtime.shutdown().await.unwrap();

    assert_eq!(
        store.load(user.id).unwrap().unwrap().stats,
        PetStats::initial()
    );
}

/// Store whose pet sweep always fails.
struct BrokenStore(InMemoryStore);

impl UserRepository for BrokenStore {
    fn create_fenced(
        &self,
        new_user: &NewUser,
        fence: &CommitFence,
    ) -> runtime::repository::Result<User> {
        self.0.create_fenced(new_user, fence)
    }
    fn find_by_username(&self, username: &str) -> runtime::repository::Result<Option<User>> {
        self.0.find_by_username(username)
    }
    fn find_by_id(&self, id: UserId) -> runtime::repository::Result<Option<User>> {
        self.0.find_by_id(id)
    }
}

impl PetRepository for BrokenStore {
    fn load(&self, user_id: UserId) -> runtime::repository::Result<Option<Pet>> {
        self.0.load(user_id)
    }
    fn update_fenced(
        &self,
        user_id: UserId,
        update: StatUpdate<'_>,
        fence: &CommitFence,
    ) -> runtime::repository::Result<Option<Pet>> {
        self.0.update_fenced(user_id, update, fence)
    }
    fn update_all(&self, _update: StatUpdate<'_>) -> runtime::repository::Result<usize> {
        Err(RepositoryError::CorruptedData("disk on fire".into()))
    }
    fn count(&self) -> runtime::repository::Result<usize> {
        self.0.count()
    }
}

#[tokio::test]
async fn failing_sweeps_are_reported_and_worker_keeps_running() {
    let runtime = start(
        Arc::new(BrokenStore(InMemoryStore::new())),
        decay_every(10, 4),
    )
    .await;
    let mut rx = runtime.subscribe(Topic::Decay);

    for _ in 0..3 {
        match next_decay(&mut rx).await {
            DecayEvent::Failed { reason } => assert!(reason.contains("disk on fire")),
            other => panic!("unexpected event: {other:?}"),
        }
    }
    let metrics = runtime.decay_metrics();
    assert!(metrics.failed() >= 3);
    assert_eq!(metrics.sweeps(), 0);
    runtime.shutdown().await.unwrap();
}

/// Store whose sweep is slower than both the period and the storage timeout.
struct SlowStore {
    inner: InMemoryStore,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl UserRepository for SlowStore {
    fn create_fenced(
        &self,
        new_user: &NewUser,
        fence: &CommitFence,
    ) -> runtime::repository::Result<User> {
        self.inner.create_fenced(new_user, fence)
    }
    fn find_by_username(&self, username: &str) -> runtime::repository::Result<Option<User>> {
        self.inner.find_by_username(username)
    }
    fn find_by_id(&self, id: UserId) -> runtime::repository::Result<Option<User>> {
        self.inner.find_by_id(id)
    }
}

impl PetRepository for SlowStore {
    fn load(&self, user_id: UserId) -> runtime::repository::Result<Option<Pet>> {
        self.inner.load(user_id)
    }
    fn update_fenced(
        &self,
        user_id: UserId,
        update: StatUpdate<'_>,
        fence: &CommitFence,
    ) -> runtime::repository::Result<Option<Pet>> {
        self.inner.update_fenced(user_id, update, fence)
    }
    fn update_all(&self, update: StatUpdate<'_>) -> runtime::repository::Result<usize> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        let result = self.inner.update_all(update);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
    fn count(&self) -> runtime::repository::Result<usize> {
        self.inner.count()
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn slow_sweeps_never_overlap() {
    let store = Arc::new(SlowStore {
        inner: InMemoryStore::new(),
        delay: Duration::from_millis(120),
        in_flight: AtomicUsize::new(0),
        max_in_flight: AtomicUsize::new(0),
    });
    store
        .create(&NewUser::new("alice", "hash"))
        .expect("seed user");

    let config = RuntimeConfig {
        storage_timeout: Duration::from_millis(30),
        ..decay_every(10, 1)
    };
    let runtime = start(store.clone(), config).await;

    tokio::time::sleep(Duration::from_millis(600)).await;
    let metrics = runtime.decay_metrics();
    runtime.shutdown().await.unwrap();

    assert_eq!(store.max_in_flight.load(Ordering::SeqCst), 1);
    assert!(metrics.failed() >= 1, "timed-out sweeps count as failures");
    assert!(metrics.skipped() >= 1, "ticks during a running sweep are skipped");
    assert!(metrics.late() >= 1, "parked sweeps report when they finish");
    assert!(metrics.total_swept() >= 1);
}
