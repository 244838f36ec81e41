//! Simulation coordinator
//!
//! The coordinator owns the clock, the waiting queue and the completion
//! counter, and drives every tick in two phases: all still-active customers
//! first, then all tellers. Between the phases the coordinator admits the
//! tick's arrivals to the queue in input order, so a customer arriving on
//! tick `T` is visible to the tellers on tick `T` and same-tick arrivals are
//! served in the order they were listed.
//!
//! Two drivers execute the phases:
//!
//! - [`ExecutionMode::Threaded`]: one OS thread per actor, each synchronized
//!   with the coordinator through its own rendezvous.
//! - [`ExecutionMode::Inline`]: actors stepped in order on the coordinator
//!   thread. Timings are identical to the threaded driver.

use crate::report::{ServiceRecord, SimulationReport, TellerSummary};
use crate::simulation::actor::{rendezvous, run_actor, PhaseLink};
use crate::simulation::{
    Actor, Customer, CustomerActor, SimulationError, SimulationResult, SimulationState,
    TellerActor,
};
use crate::types::{ExecutionMode, RunId, SimulationConfig, TellerId, Tick};
use crate::workload::CustomerRecord;
use chrono::Utc;
use std::sync::Arc;
use std::thread::{self, Scope, ScopedJoinHandle};
use tracing::{debug, info, instrument, trace, warn};

/// Drives the customer and teller actors through the tick loop
#[derive(Debug)]
pub struct Coordinator {
    run_id: RunId,
    customers: Vec<Arc<Customer>>,
    teller_count: usize,
    mode: ExecutionMode,
    max_ticks: Option<Tick>,
}

impl Coordinator {
    /// Create a coordinator for `records` served by `teller_count` tellers
    pub fn new(records: &[CustomerRecord], teller_count: usize) -> Self {
        Self {
            run_id: RunId::new(),
            customers: records.iter().map(|r| Arc::new(Customer::from_record(r))).collect(),
            teller_count,
            mode: ExecutionMode::default(),
            max_ticks: None,
        }
    }

    /// Create a coordinator from a validated configuration
    pub fn from_config(
        config: &SimulationConfig,
        records: &[CustomerRecord],
    ) -> SimulationResult<Self> {
        config.validate()?;

        let mut coordinator =
            Self::new(records, config.teller_count).with_mode(config.execution_mode);
        if let Some(limit) = config.max_ticks {
            coordinator = coordinator.with_max_ticks(limit);
        }
        Ok(coordinator)
    }

    /// Select the execution mode
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Abort with [`SimulationError::TickLimitExceeded`] instead of processing tick `limit`
    pub fn with_max_ticks(mut self, limit: Tick) -> Self {
        self.max_ticks = Some(limit);
        self
    }

    /// Run identity
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Customers in input order
    pub fn customers(&self) -> &[Arc<Customer>] {
        &self.customers
    }

    /// Run the simulation until every customer has been served
    #[instrument(skip(self), fields(run_id = %self.run_id, customers = self.customers.len(), tellers = self.teller_count, mode = %self.mode))]
    pub fn run(self) -> SimulationResult<SimulationReport> {
        if self.teller_count == 0 && !self.customers.is_empty() {
            return Err(SimulationError::configuration_error(
                "at least one teller is required to serve customers",
            ));
        }
        let teller_count = u32::try_from(self.teller_count).map_err(|_| {
            SimulationError::configuration_error(format!(
                "{} tellers exceed the largest teller id {}",
                self.teller_count,
                u32::MAX
            ))
        })?;

        let started_at = Utc::now();
        let state = SimulationState::new(self.customers.len());
        info!("Starting simulation");

        let tellers = match self.mode {
            ExecutionMode::Inline => {
                let driver = InlineDriver::new(&self.customers, teller_count);
                self.drive(driver, &state)?
            }
            ExecutionMode::Threaded => thread::scope(|scope| {
                let driver =
                    ThreadedDriver::spawn(scope, &self.customers, teller_count, &state)?;
                self.drive(driver, &state)
            })?,
        };

        let final_tick = state.clock().now();
        let records = self
            .customers
            .iter()
            .map(|customer| {
                customer.service_record().ok_or_else(|| {
                    SimulationError::internal_error(format!(
                        "customer {} finished the run without a service record",
                        customer.id()
                    ))
                })
            })
            .collect::<SimulationResult<Vec<ServiceRecord>>>()?;

        info!(final_tick, "Simulation completed: {} customers served", records.len());

        Ok(SimulationReport {
            run_id: self.run_id,
            started_at,
            teller_count: self.teller_count,
            mode: self.mode,
            final_tick,
            records,
            tellers,
        })
    }

    /// The tick loop shared by both drivers
    fn drive<D: PhaseDriver>(
        &self,
        mut driver: D,
        state: &SimulationState,
    ) -> SimulationResult<Vec<TellerSummary>> {
        while !state.all_served() {
            let tick = state.clock().now();

            if let Some(limit) = self.max_ticks {
                if tick >= limit {
                    let served = state.completions().served();
                    warn!(limit, served, "tick limit reached before all customers were served");
                    driver.abort();
                    return Err(SimulationError::TickLimitExceeded {
                        limit,
                        served,
                        total: state.total_customers(),
                    });
                }
            }

            let step = driver.customer_phase(tick, state).and_then(|()| {
                let admitted = state.queue().admit_arrivals();
                if admitted > 0 {
                    trace!(tick, admitted, "arrivals admitted to queue");
                }
                driver.teller_phase(tick, state)
            });
            if let Err(error) = step {
                driver.abort();
                return Err(error);
            }

            trace!(
                tick,
                queued = state.queue().len(),
                served = state.completions().served(),
                "tick complete"
            );

            if state.all_served() {
                break;
            }
            state.clock().advance();
        }

        debug!(tick = state.clock().now(), "all customers served, stopping tellers");
        driver.shutdown()
    }
}

/// Executes the two phases of a tick for one execution mode
trait PhaseDriver {
    /// Run every active customer's step for `tick` and wait for all of them
    ///
    /// Customers already served take their last step here and are retired.
    fn customer_phase(&mut self, tick: Tick, state: &SimulationState) -> SimulationResult<()>;

    /// Run every teller's step for `tick` and wait for all of them
    fn teller_phase(&mut self, tick: Tick, state: &SimulationState) -> SimulationResult<()>;

    /// Stop every remaining actor and collect the teller summaries
    fn shutdown(self) -> SimulationResult<Vec<TellerSummary>>;

    /// Tear down after a failure without reporting further errors
    fn abort(self);
}

/// Steps actors on the coordinator thread
struct InlineDriver {
    customers: Vec<CustomerActor>,
    tellers: Vec<TellerActor>,
}

impl InlineDriver {
    fn new(customers: &[Arc<Customer>], teller_count: u32) -> Self {
        Self {
            customers: customers
                .iter()
                .enumerate()
                .map(|(position, c)| CustomerActor::new(Arc::clone(c), position))
                .collect(),
            tellers: teller_ids(teller_count).map(TellerActor::new).collect(),
        }
    }
}

impl PhaseDriver for InlineDriver {
    fn customer_phase(&mut self, tick: Tick, state: &SimulationState) -> SimulationResult<()> {
        for actor in &mut self.customers {
            actor.on_tick(tick, state);
        }
        self.customers.retain(|actor| !actor.is_retired());
        Ok(())
    }

    fn teller_phase(&mut self, tick: Tick, state: &SimulationState) -> SimulationResult<()> {
        for actor in &mut self.tellers {
            actor.on_tick(tick, state);
        }
        Ok(())
    }

    fn shutdown(self) -> SimulationResult<Vec<TellerSummary>> {
        Ok(self.tellers.iter().map(TellerActor::summary).collect())
    }

    fn abort(self) {}
}

/// One actor thread as seen by the coordinator
struct Member<'scope, A> {
    label: String,
    link: PhaseLink,
    handle: ScopedJoinHandle<'scope, A>,
}

impl<'scope, A: Actor + 'scope> Member<'scope, A> {
    fn spawn<'env>(
        scope: &'scope Scope<'scope, 'env>,
        actor: A,
        state: &'scope SimulationState,
    ) -> SimulationResult<Self> {
        let label = actor.label();
        let (link, port) = rendezvous();
        let handle = thread::Builder::new()
            .name(label.replace(' ', "-"))
            .spawn_scoped(scope, move || run_actor(actor, port, state))
            .map_err(|source| SimulationError::SpawnError { actor: label.clone(), source })?;
        Ok(Self { label, link, handle })
    }

    /// Stop the actor and wait for its thread
    fn join(self) -> SimulationResult<A> {
        self.link.stop();
        drop(self.link);
        self.handle.join().map_err(|_| SimulationError::actor_panicked(self.label))
    }

    /// Wait for an actor that leaves its loop on its own
    fn wait(self) -> SimulationResult<A> {
        drop(self.link);
        self.handle.join().map_err(|_| SimulationError::actor_panicked(self.label))
    }

    /// Explain why this actor stopped answering
    fn failure(self, tick: Tick) -> SimulationError {
        let label = self.label.clone();
        match self.join() {
            Err(panicked) => panicked,
            Ok(_) => SimulationError::actor_disconnected(label, tick),
        }
    }
}

/// Release every member for `tick`, then collect every acknowledgement
///
/// Acknowledgements are collected only after all releases, so members of
/// the same phase run concurrently. On failure returns the position of the
/// member that stopped answering.
fn run_group<'a, 'scope: 'a, A, I>(members: I, tick: Tick) -> Result<(), usize>
where
    A: Actor + 'scope,
    I: Iterator<Item = &'a Member<'scope, A>> + Clone,
{
    if let Some(index) = members.clone().position(|member| member.link.release(tick).is_err()) {
        return Err(index);
    }
    match members.clone().position(|member| member.link.await_ack().is_err()) {
        Some(index) => Err(index),
        None => Ok(()),
    }
}

/// Runs every actor on its own scoped thread
struct ThreadedDriver<'scope> {
    customers: Vec<(Arc<Customer>, Member<'scope, CustomerActor>)>,
    tellers: Vec<Member<'scope, TellerActor>>,
}

impl<'scope> ThreadedDriver<'scope> {
    fn spawn<'env>(
        scope: &'scope Scope<'scope, 'env>,
        customers: &[Arc<Customer>],
        teller_count: u32,
        state: &'scope SimulationState,
    ) -> SimulationResult<Self> {
        let mut driver = Self { customers: Vec::new(), tellers: Vec::new() };

        for (position, customer) in customers.iter().enumerate() {
            let actor = CustomerActor::new(Arc::clone(customer), position);
            match Member::spawn(scope, actor, state) {
                Ok(member) => driver.customers.push((Arc::clone(customer), member)),
                Err(error) => {
                    driver.abort();
                    return Err(error);
                }
            }
        }
        for id in teller_ids(teller_count) {
            match Member::spawn(scope, TellerActor::new(id), state) {
                Ok(member) => driver.tellers.push(member),
                Err(error) => {
                    driver.abort();
                    return Err(error);
                }
            }
        }

        debug!(
            customers = driver.customers.len(),
            tellers = driver.tellers.len(),
            "spawned actor threads"
        );
        Ok(driver)
    }
}

impl PhaseDriver for ThreadedDriver<'_> {
    fn customer_phase(&mut self, tick: Tick, _state: &SimulationState) -> SimulationResult<()> {
        run_group(self.customers.iter().map(|(_, member)| member), tick)
            .map_err(|index| self.customers.remove(index).1.failure(tick))?;

        // Served customers leave their loop after this acknowledgement.
        let (retired, active): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.customers).into_iter().partition(|(c, _)| c.is_done());
        self.customers = active;

        let mut first_error = None;
        for (customer, member) in retired {
            trace!(customer = %customer.id(), "served customer left");
            if let Err(error) = member.wait() {
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn teller_phase(&mut self, tick: Tick, _state: &SimulationState) -> SimulationResult<()> {
        run_group(self.tellers.iter(), tick).map_err(|index| self.tellers.remove(index).failure(tick))
    }

    fn shutdown(self) -> SimulationResult<Vec<TellerSummary>> {
        let tellers = join_all(self.tellers);
        let customers = join_all(self.customers.into_iter().map(|(_, member)| member));

        let tellers = tellers?;
        customers?;
        Ok(tellers.iter().map(TellerActor::summary).collect())
    }

    fn abort(self) {
        let _ = join_all(self.customers.into_iter().map(|(_, member)| member));
        let _ = join_all(self.tellers);
    }
}

/// Join every member, reporting the first failure after all threads are gone
fn join_all<'scope, A, I>(members: I) -> SimulationResult<Vec<A>>
where
    A: Actor + 'scope,
    I: IntoIterator<Item = Member<'scope, A>>,
{
    let mut first_error = None;
    let mut actors = Vec::new();
    for member in members {
        match member.join() {
            Ok(actor) => actors.push(actor),
            Err(error) => {
                first_error.get_or_insert(error);
            }
        }
    }
    match first_error {
        Some(error) => Err(error),
        None => Ok(actors),
    }
}

fn teller_ids(teller_count: u32) -> impl Iterator<Item = TellerId> {
    (1..=teller_count).map(TellerId::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CustomerId;

    fn records(customers: &[(u32, Tick, Tick)]) -> Vec<CustomerRecord> {
        customers.iter().map(|&(id, arrival, duration)| CustomerRecord::new(id, arrival, duration)).collect()
    }

    fn run(customers: &[(u32, Tick, Tick)], tellers: usize, mode: ExecutionMode) -> SimulationReport {
        Coordinator::new(&records(customers), tellers).with_mode(mode).run().unwrap()
    }

    #[test]
    fn test_single_teller_serves_in_order() {
        for mode in [ExecutionMode::Inline, ExecutionMode::Threaded] {
            let report = run(&[(1, 0, 2), (2, 0, 1)], 1, mode);
            assert_eq!(
                report.timings(),
                vec![(CustomerId::new(1), 0, 2), (CustomerId::new(2), 2, 3)],
                "{} mode",
                mode
            );
            assert_eq!(report.final_tick, 2);
            assert_eq!(report.tellers[0].served, vec![CustomerId::new(1), CustomerId::new(2)]);
            assert_eq!(report.tellers[0].busy_ticks, 3);
        }
    }

    #[test]
    fn test_empty_workload_finishes_immediately() {
        for mode in [ExecutionMode::Inline, ExecutionMode::Threaded] {
            let report = run(&[], 3, mode);
            assert!(report.records.is_empty());
            assert_eq!(report.final_tick, 0);
            assert_eq!(report.tellers.len(), 3);
            assert!(report.tellers.iter().all(|t| t.customers_served == 0));
        }
    }

    #[test]
    fn test_zero_tellers_is_rejected() {
        let result = Coordinator::new(&records(&[(1, 0, 1)]), 0).run();
        assert!(matches!(result, Err(SimulationError::ConfigurationError(_))));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_teller_count_beyond_id_range_is_rejected() {
        let result = Coordinator::new(&[], usize::MAX).run();
        assert!(
            matches!(result, Err(SimulationError::ConfigurationError(ref message)) if message.contains("largest teller id"))
        );
    }

    #[test]
    fn test_same_tick_arrivals_are_served_in_input_order() {
        let customers: Vec<(u32, Tick, Tick)> =
            (0..24).map(|i| (100 - i, 0, 1 + Tick::from(i % 3))).collect();
        let expected: Vec<CustomerId> = customers.iter().map(|&(id, _, _)| CustomerId::new(id)).collect();

        let inline = run(&customers, 1, ExecutionMode::Inline);
        assert_eq!(inline.tellers[0].served, expected);
        for _ in 0..10 {
            let threaded = run(&customers, 1, ExecutionMode::Threaded);
            assert_eq!(threaded.tellers[0].served, expected);
            assert_eq!(threaded.timings(), inline.timings());
        }
    }

    #[test]
    fn test_served_customers_leave_without_stop() {
        let customers = vec![Arc::new(Customer::new(CustomerId::new(1), 0, 1))];
        let state = SimulationState::new(1);

        thread::scope(|scope| {
            let mut driver = ThreadedDriver::spawn(scope, &customers, 1, &state).unwrap();
            driver.customer_phase(0, &state).unwrap();
            state.queue().admit_arrivals();
            driver.teller_phase(0, &state).unwrap();
            assert!(customers[0].is_done());
            assert_eq!(driver.customers.len(), 1);

            driver.customer_phase(1, &state).unwrap();
            assert!(driver.customers.is_empty());

            let tellers = driver.shutdown().unwrap();
            assert_eq!(tellers[0].served, vec![CustomerId::new(1)]);
        });
    }

    #[test]
    fn test_tick_limit_aborts_run() {
        for mode in [ExecutionMode::Inline, ExecutionMode::Threaded] {
            let result = Coordinator::new(&records(&[(1, 0, 2), (2, 0, 1)]), 1)
                .with_mode(mode)
                .with_max_ticks(2)
                .run();
            match result {
                Err(SimulationError::TickLimitExceeded { limit, served, total }) => {
                    assert_eq!((limit, served, total), (2, 0, 2));
                }
                other => panic!("expected tick limit error, got {:?}", other),
            }

            let report = Coordinator::new(&records(&[(1, 0, 2), (2, 0, 1)]), 1)
                .with_mode(mode)
                .with_max_ticks(3)
                .run()
                .unwrap();
            assert_eq!(report.final_tick, 2);
        }
    }

    #[test]
    fn test_from_config_applies_settings() {
        let config = SimulationConfig {
            teller_count: 2,
            execution_mode: ExecutionMode::Inline,
            max_ticks: Some(10),
            input: Some("customers.txt".to_string()),
            ..Default::default()
        };
        let coordinator = Coordinator::from_config(&config, &records(&[(1, 0, 1)])).unwrap();
        assert_eq!(coordinator.customers().len(), 1);

        let report = coordinator.run().unwrap();
        assert_eq!(report.mode, ExecutionMode::Inline);
        assert_eq!(report.teller_count, 2);

        let invalid = SimulationConfig { teller_count: 0, ..config };
        assert!(Coordinator::from_config(&invalid, &[]).is_err());
    }

    struct Panicker;

    impl Actor for Panicker {
        fn label(&self) -> String {
            "panicker".to_string()
        }

        fn on_tick(&mut self, _tick: Tick, _state: &SimulationState) {
            panic!("actor failure");
        }
    }

    #[test]
    fn test_panicking_actor_is_reported() {
        let state = SimulationState::new(1);
        let error = thread::scope(|scope| {
            let member = Member::spawn(scope, Panicker, &state).unwrap();
            let index = run_group(std::iter::once(&member), 0).unwrap_err();
            assert_eq!(index, 0);
            member.failure(0)
        });
        assert!(matches!(error, SimulationError::ActorPanicked { ref actor } if actor == "panicker"));
    }

    #[test]
    fn test_join_all_collects_actors() {
        let state = SimulationState::new(0);
        let tellers = thread::scope(|scope| {
            let members: Vec<_> = teller_ids(3)
                .map(|id| Member::spawn(scope, TellerActor::new(id), &state).unwrap())
                .collect();
            run_group(members.iter(), 0).unwrap();
            join_all(members).unwrap()
        });
        let ids: Vec<u32> = tellers.iter().map(|t| t.id().value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
