//! Statistics collection and reporting
//!
//! This module derives queueing statistics from a completed run.

use crate::report::SimulationReport;
use crate::types::{ExecutionMode, TellerId, Tick};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Utilisation of a single teller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TellerUtilisation {
    /// Teller identity
    pub teller: TellerId,
    /// Customers served
    pub customers_served: usize,
    /// Ticks spent serving
    pub busy_ticks: Tick,
    /// `busy_ticks / makespan` as a percentage
    pub utilisation_percentage: f64,
}

/// Queueing statistics for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationStatistics {
    /// Number of customers served
    pub total_customers: usize,
    /// Number of tellers
    pub teller_count: usize,
    /// Execution mode used
    pub mode: ExecutionMode,
    /// Tick on which the last customer was finalized
    pub final_tick: Tick,
    /// Latest service end
    pub makespan: Tick,
    /// Sum of queue waits
    pub total_wait: Tick,
    /// Longest queue wait
    pub max_wait: Tick,
    /// Customers served without waiting
    pub served_immediately: usize,
    /// Sum of arrival-to-end times
    pub total_turnaround: Tick,
    /// Per-teller breakdown, by teller identity
    pub tellers: Vec<TellerUtilisation>,
    /// Wall-clock time the run took
    pub simulation_duration: Duration,
}

impl SimulationStatistics {
    /// Derive statistics from a completed run
    pub fn from_report(report: &SimulationReport) -> Self {
        let makespan = report.makespan();
        let tellers = report
            .tellers
            .iter()
            .map(|summary| TellerUtilisation {
                teller: summary.id,
                customers_served: summary.customers_served,
                busy_ticks: summary.busy_ticks,
                utilisation_percentage: percentage(summary.busy_ticks, makespan),
            })
            .collect();

        Self {
            total_customers: report.records.len(),
            teller_count: report.teller_count,
            mode: report.mode,
            final_tick: report.final_tick,
            makespan,
            total_wait: report.records.iter().map(|r| r.wait()).sum(),
            max_wait: report.records.iter().map(|r| r.wait()).max().unwrap_or(0),
            served_immediately: report.records.iter().filter(|r| r.wait() == 0).count(),
            total_turnaround: report.records.iter().map(|r| r.turnaround()).sum(),
            tellers,
            simulation_duration: Duration::from_secs(0),
        }
    }

    /// Set the wall-clock duration of the run
    pub fn set_simulation_duration(&mut self, duration: Duration) {
        self.simulation_duration = duration;
    }

    /// Mean ticks spent in the queue
    pub fn average_wait(&self) -> f64 {
        average(self.total_wait, self.total_customers)
    }

    /// Mean ticks from arrival to end of service
    pub fn average_turnaround(&self) -> f64 {
        average(self.total_turnaround, self.total_customers)
    }

    /// Percentage of customers served without waiting
    pub fn served_immediately_percentage(&self) -> f64 {
        if self.total_customers == 0 {
            0.0
        } else {
            (self.served_immediately as f64 / self.total_customers as f64) * 100.0
        }
    }

    /// Mean utilisation over all tellers
    pub fn average_utilisation(&self) -> f64 {
        if self.tellers.is_empty() {
            0.0
        } else {
            self.tellers.iter().map(|t| t.utilisation_percentage).sum::<f64>()
                / self.tellers.len() as f64
        }
    }

    /// Customers served summed over every teller
    pub fn customers_served_by_tellers(&self) -> usize {
        self.tellers.iter().map(|t| t.customers_served).sum()
    }

    /// Generate a human readable summary report
    pub fn generate_summary_report(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Bank Teller Simulation Summary ===\n\n");
        report.push_str(&format!(
            "Simulation Duration: {:.3} seconds ({} mode)\n",
            self.simulation_duration.as_secs_f64(),
            self.mode
        ));
        report.push_str(&format!("Final Tick: {}\n", self.final_tick));
        report.push_str(&format!("Makespan: {} ticks\n\n", self.makespan));

        report.push_str("Customers:\n");
        report.push_str(&format!("  - Served: {}\n", self.total_customers));
        report.push_str(&format!(
            "  - Served Immediately: {} ({:.1}%)\n",
            self.served_immediately,
            self.served_immediately_percentage()
        ));
        report.push_str(&format!("  - Average Wait: {:.2} ticks\n", self.average_wait()));
        report.push_str(&format!("  - Longest Wait: {} ticks\n", self.max_wait));
        report.push_str(&format!(
            "  - Average Turnaround: {:.2} ticks\n\n",
            self.average_turnaround()
        ));

        report.push_str(&format!(
            "Tellers ({}, average utilisation {:.1}%):\n",
            self.teller_count,
            self.average_utilisation()
        ));
        for teller in &self.tellers {
            report.push_str(&format!(
                "  - {}: {} customers, {} busy ticks ({:.1}%)\n",
                teller.teller,
                teller.customers_served,
                teller.busy_ticks,
                teller.utilisation_percentage
            ));
        }

        report
    }

    /// Generate a compact one-line summary suitable for logging
    pub fn generate_compact_summary(&self) -> String {
        format!(
            "{} customers, {} tellers, makespan {} ticks, average wait {:.2} ticks, max wait {} ticks",
            self.total_customers,
            self.teller_count,
            self.makespan,
            self.average_wait(),
            self.max_wait
        )
    }
}

impl fmt::Display for SimulationStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.generate_summary_report())
    }
}

fn average(total: Tick, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

fn percentage(part: Tick, whole: Tick) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ServiceRecord, TellerSummary};
    use crate::types::{CustomerId, RunId};
    use chrono::Utc;

    fn record(id: u32, arrival: Tick, start: Tick, end: Tick, teller: u32) -> ServiceRecord {
        ServiceRecord {
            id: CustomerId::new(id),
            arrival,
            service_start: start,
            service_end: end,
            teller: TellerId::new(teller),
        }
    }

    fn report() -> SimulationReport {
        // One teller: C1 (arrival 0, 3 ticks), C2 (arrival 1, 1 tick)
        SimulationReport {
            run_id: RunId::new(),
            started_at: Utc::now(),
            teller_count: 2,
            mode: ExecutionMode::Inline,
            final_tick: 3,
            records: vec![record(1, 0, 0, 3, 1), record(2, 1, 3, 4, 1)],
            tellers: vec![
                TellerSummary {
                    id: TellerId::new(1),
                    customers_served: 2,
                    busy_ticks: 4,
                    served: vec![CustomerId::new(1), CustomerId::new(2)],
                },
                TellerSummary {
                    id: TellerId::new(2),
                    customers_served: 0,
                    busy_ticks: 0,
                    served: Vec::new(),
                },
            ],
        }
    }

    #[test]
    fn test_statistics_from_report() {
        let stats = SimulationStatistics::from_report(&report());

        assert_eq!(stats.total_customers, 2);
        assert_eq!(stats.makespan, 4);
        assert_eq!(stats.total_wait, 2);
        assert_eq!(stats.max_wait, 2);
        assert_eq!(stats.served_immediately, 1);
        assert_eq!(stats.total_turnaround, 6);
        assert_eq!(stats.average_wait(), 1.0);
        assert_eq!(stats.average_turnaround(), 3.0);
        assert_eq!(stats.served_immediately_percentage(), 50.0);
        assert_eq!(stats.customers_served_by_tellers(), 2);
    }

    #[test]
    fn test_teller_utilisation() {
        let stats = SimulationStatistics::from_report(&report());

        assert_eq!(stats.tellers.len(), 2);
        assert_eq!(stats.tellers[0].utilisation_percentage, 100.0);
        assert_eq!(stats.tellers[1].utilisation_percentage, 0.0);
        assert_eq!(stats.average_utilisation(), 50.0);
    }

    #[test]
    fn test_empty_report_statistics() {
        let mut empty = report();
        empty.records.clear();
        empty.tellers.clear();

        let stats = SimulationStatistics::from_report(&empty);
        assert_eq!(stats.makespan, 0);
        assert_eq!(stats.average_wait(), 0.0);
        assert_eq!(stats.served_immediately_percentage(), 0.0);
        assert_eq!(stats.average_utilisation(), 0.0);
    }

    #[test]
    fn test_summary_report_contents() {
        let mut stats = SimulationStatistics::from_report(&report());
        stats.set_simulation_duration(Duration::from_millis(1500));

        let summary = stats.generate_summary_report();
        assert!(summary.contains("Simulation Duration: 1.500 seconds (inline mode)"));
        assert!(summary.contains("Makespan: 4 ticks"));
        assert!(summary.contains("Average Wait: 1.00 ticks"));
        assert!(summary.contains("T1: 2 customers, 4 busy ticks (100.0%)"));
        assert_eq!(stats.to_string(), summary);

        let compact = stats.generate_compact_summary();
        assert!(compact.starts_with("2 customers, 2 tellers, makespan 4 ticks"));
    }
}
