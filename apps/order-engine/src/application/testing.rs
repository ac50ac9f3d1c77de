//! Hand-written port fakes shared by the use case tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal_macros::dec;

use crate::application::ports::{
    EventPublishError, EventPublisherPort, MarginDecision, MarginRequest, MarketRegistryError,
    MarketRegistryPort, MatchingError, MatchingPort, PositionError, PositionPort, RiskCheckError,
    RiskCheckPort,
};
use crate::domain::market::{FillNotice, Market};
use crate::domain::order_lifecycle::{
    CreateOrderCommand, MatchDecision, Order, OrderDraft, OrderEvent, OrderKind, OrderRepository,
    OrderSide, PersistenceError,
};
use crate::domain::shared::{AccountId, OrderId, Symbol, Timestamp};

/// A valid limit buy on BTC-PERP.
pub fn btc_draft() -> OrderDraft {
    OrderDraft {
        account_id: "u1".to_string(),
        symbol: "BTC-PERP".to_string(),
        side: "buy".to_string(),
        kind: "limit".to_string(),
        size: 0.5,
        price: Some(50_000.0),
        leverage: 10,
    }
}

/// A `Pending` order of size 1 created at a fixed instant.
pub fn pending_order(account: &str, created_at: &str) -> Order {
    Order::new_with_id(
        OrderId::generate(),
        CreateOrderCommand {
            account_id: AccountId::new(account),
            symbol: Symbol::new("BTC-PERP"),
            side: OrderSide::Buy,
            kind: OrderKind::Limit,
            size: dec!(1),
            price: dec!(50000),
            leverage: 5,
        },
        Timestamp::parse(created_at).unwrap(),
    )
}

/// Snapshot for a market used across tests.
pub fn market(symbol: &str, index: rust_decimal::Decimal, mark: rust_decimal::Decimal) -> Market {
    let symbol = Symbol::new(symbol);
    let (base, quote) = symbol
        .as_str()
        .split_once('-')
        .map(|(b, q)| (b.to_string(), q.to_string()))
        .unwrap();
    Market {
        symbol,
        base_asset: base,
        quote_asset: quote,
        index_price: index,
        mark_price: mark,
        funding_rate: dec!(0.0001),
        volume_24h: dec!(1000000),
        open_interest: dec!(500000),
    }
}

// ============================================================================
// Persistence
// ============================================================================

#[derive(Default)]
pub struct RecordingRepository {
    orders: RwLock<HashMap<OrderId, Order>>,
    saves: AtomicUsize,
    finds: AtomicUsize,
    fail_saves_from: AtomicUsize,
    fail_finds: AtomicBool,
}

impl RecordingRepository {
    /// Seed an order without counting a save.
    pub fn insert(&self, order: Order) {
        self.orders
            .write()
            .unwrap()
            .insert(order.id().clone(), order);
    }

    pub fn get(&self, id: &OrderId) -> Option<Order> {
        self.orders.read().unwrap().get(id).cloned()
    }

    /// Every save from the `n`th (1-based) onwards fails.
    pub fn fail_saves_from(&self, n: usize) {
        self.fail_saves_from.store(n, Ordering::SeqCst);
    }

    pub fn fail_finds(&self) {
        self.fail_finds.store(true, Ordering::SeqCst);
    }

    pub fn save_calls(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn find_calls(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    fn check_finds(&self, operation: &'static str) -> Result<(), PersistenceError> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        if self.fail_finds.load(Ordering::SeqCst) {
            return Err(PersistenceError::new(operation, "store offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for RecordingRepository {
    async fn save(&self, order: &Order) -> Result<(), PersistenceError> {
        let n = self.saves.fetch_add(1, Ordering::SeqCst) + 1;
        let fail_from = self.fail_saves_from.load(Ordering::SeqCst);
        if fail_from != 0 && n >= fail_from {
            return Err(PersistenceError::new("save", "disk full"));
        }
        self.insert(order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, PersistenceError> {
        self.check_finds("find_by_id")?;
        Ok(self.get(id))
    }

    async fn find_by_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<Order>, PersistenceError> {
        self.check_finds("find_by_account")?;
        Ok(self
            .orders
            .read()
            .unwrap()
            .values()
            .filter(|o| o.account_id() == account_id)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), PersistenceError> {
        Ok(())
    }
}

// ============================================================================
// Matching
// ============================================================================

pub struct ScriptedMatcher {
    answer: Option<Result<MatchDecision, MatchingError>>,
    calls: AtomicUsize,
}

impl ScriptedMatcher {
    pub const fn deciding(decision: MatchDecision) -> Self {
        Self {
            answer: Some(Ok(decision)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            answer: Some(Err(MatchingError::Unreachable {
                message: message.to_string(),
            })),
            calls: AtomicUsize::new(0),
        }
    }

    /// Never answers.
    pub const fn hanging() -> Self {
        Self {
            answer: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MatchingPort for ScriptedMatcher {
    async fn submit_for_matching(&self, _order: &Order) -> Result<MatchDecision, MatchingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            Some(answer) => answer.clone(),
            None => std::future::pending().await,
        }
    }
}

// ============================================================================
// Market registry and risk
// ============================================================================

pub struct FixedMarkets {
    markets: HashMap<Symbol, Market>,
    calls: AtomicUsize,
}

impl FixedMarkets {
    /// BTC-PERP (index 50000, mark 50010) and ETH-USDT (index 3000, mark 3005).
    pub fn standard() -> Self {
        let markets = [
            market("BTC-PERP", dec!(50000), dec!(50010)),
            market("ETH-USDT", dec!(3000), dec!(3005)),
        ];
        Self {
            markets: markets
                .into_iter()
                .map(|m| (m.symbol.clone(), m))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketRegistryPort for FixedMarkets {
    async fn find_market(&self, symbol: &Symbol) -> Result<Option<Market>, MarketRegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.markets.get(symbol).cloned())
    }
}

pub struct FixedRisk {
    max_leverage: u32,
    margin: MarginDecision,
    last_request: Mutex<Option<MarginRequest>>,
}

impl FixedRisk {
    pub fn approving(max_leverage: u32) -> Self {
        Self {
            max_leverage,
            margin: MarginDecision::Approved,
            last_request: Mutex::new(None),
        }
    }

    pub fn denying(max_leverage: u32, reason: &str) -> Self {
        Self {
            max_leverage,
            margin: MarginDecision::Denied {
                reason: reason.to_string(),
            },
            last_request: Mutex::new(None),
        }
    }

    pub fn last_request(&self) -> Option<MarginRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl RiskCheckPort for FixedRisk {
    async fn max_leverage(&self, _symbol: &Symbol) -> Result<u32, RiskCheckError> {
        Ok(self.max_leverage)
    }

    async fn check_margin(&self, request: &MarginRequest) -> Result<MarginDecision, RiskCheckError> {
        *self.last_request.lock().unwrap() = Some(request.clone());
        Ok(self.margin.clone())
    }
}

// ============================================================================
// Side effects
// ============================================================================

#[derive(Default)]
pub struct RecordingPositions {
    notices: Mutex<Vec<FillNotice>>,
}

impl RecordingPositions {
    pub fn notices(&self) -> Vec<FillNotice> {
        self.notices.lock().unwrap().clone()
    }

    /// Wait until at least `n` notices arrived, since fills are dispatched
    /// without being awaited.
    pub async fn wait_for(&self, n: usize) -> Vec<FillNotice> {
        for _ in 0..200 {
            let notices = self.notices();
            if notices.len() >= n {
                return notices;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("expected {n} fill notices, got {}", self.notices().len());
    }
}

#[async_trait]
impl PositionPort for RecordingPositions {
    async fn apply_fill(&self, notice: FillNotice) -> Result<(), PositionError> {
        self.notices.lock().unwrap().push(notice);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<OrderEvent>>,
}

impl RecordingPublisher {
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(OrderEvent::event_type)
            .collect()
    }
}

#[async_trait]
impl EventPublisherPort for RecordingPublisher {
    async fn publish_order_events(&self, events: Vec<OrderEvent>) -> Result<(), EventPublishError> {
        self.events.lock().unwrap().extend(events);
        Ok(())
    }
}
