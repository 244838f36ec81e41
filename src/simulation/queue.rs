//! Waiting queue shared by customers and tellers

use crate::simulation::Customer;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Thread-safe FIFO of customers awaiting service
///
/// Customers stage themselves on their arrival tick under their input
/// position. The coordinator admits the staged arrivals in position order
/// once every customer has acknowledged, so the queue order never depends
/// on thread scheduling. Idle tellers pop the head.
#[derive(Debug, Default)]
pub struct WaitingQueue {
    customers: Mutex<VecDeque<Arc<Customer>>>,
    arrivals: Mutex<Vec<(usize, Arc<Customer>)>>,
}

impl WaitingQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a customer at the tail
    pub fn push(&self, customer: Arc<Customer>) {
        self.customers.lock().push_back(customer);
    }

    /// Hold an arriving customer until the next [`admit_arrivals`](Self::admit_arrivals)
    ///
    /// `position` is the customer's index in the input list.
    pub fn stage(&self, position: usize, customer: Arc<Customer>) {
        self.arrivals.lock().push((position, customer));
    }

    /// Move every staged arrival to the tail, lowest input position first
    ///
    /// Returns the number of customers admitted.
    pub fn admit_arrivals(&self) -> usize {
        let mut staged = std::mem::take(&mut *self.arrivals.lock());
        staged.sort_unstable_by_key(|(position, _)| *position);

        let admitted = staged.len();
        self.customers.lock().extend(staged.into_iter().map(|(_, customer)| customer));
        admitted
    }

    /// Number of arrivals staged but not yet admitted
    pub fn staged(&self) -> usize {
        self.arrivals.lock().len()
    }

    /// Remove the customer at the head, if any
    pub fn pop(&self) -> Option<Arc<Customer>> {
        self.customers.lock().pop_front()
    }

    /// Number of waiting customers
    pub fn len(&self) -> usize {
        self.customers.lock().len()
    }

    /// Whether nobody is waiting
    pub fn is_empty(&self) -> bool {
        self.customers.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CustomerId;
    use std::thread;

    fn customer(id: u32) -> Arc<Customer> {
        Arc::new(Customer::new(CustomerId::new(id), 0, 1))
    }

    #[test]
    fn test_queue_is_fifo() {
        let queue = WaitingQueue::new();
        assert!(queue.is_empty());

        queue.push(customer(1));
        queue.push(customer(2));
        queue.push(customer(3));
        assert_eq!(queue.len(), 3);

        let order: Vec<u32> =
            std::iter::from_fn(|| queue.pop()).map(|c| c.id().value()).collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_staged_arrivals_are_admitted_in_input_order() {
        let queue = WaitingQueue::new();
        queue.push(customer(7));

        queue.stage(3, customer(30));
        queue.stage(0, customer(10));
        queue.stage(2, customer(20));
        assert_eq!(queue.staged(), 3);
        assert_eq!(queue.len(), 1);

        assert_eq!(queue.admit_arrivals(), 3);
        assert_eq!(queue.staged(), 0);
        assert_eq!(queue.admit_arrivals(), 0);

        let order: Vec<u32> =
            std::iter::from_fn(|| queue.pop()).map(|c| c.id().value()).collect();
        assert_eq!(order, vec![7, 10, 20, 30]);
    }

    #[test]
    fn test_concurrent_staging_is_admitted_in_input_order() {
        let queue = WaitingQueue::new();

        thread::scope(|scope| {
            for worker in 0..4 {
                let queue = &queue;
                scope.spawn(move || {
                    for position in (worker..100).step_by(4).rev() {
                        queue.stage(position, customer(position as u32));
                    }
                });
            }
        });

        assert_eq!(queue.admit_arrivals(), 100);
        let order: Vec<u32> =
            std::iter::from_fn(|| queue.pop()).map(|c| c.id().value()).collect();
        assert_eq!(order, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_concurrent_pops_take_each_customer_once() {
        let queue = WaitingQueue::new();
        for id in 0..200 {
            queue.push(customer(id));
        }

        let mut popped: Vec<u32> = thread::scope(|scope| {
            let workers: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        let mut mine = Vec::new();
                        while let Some(c) = queue.pop() {
                            mine.push(c.id().value());
                        }
                        mine
                    })
                })
                .collect();
            workers.into_iter().flat_map(|w| w.join().unwrap()).collect()
        });

        popped.sort_unstable();
        assert_eq!(popped, (0..200).collect::<Vec<_>>());
        assert!(queue.is_empty());
    }
}
