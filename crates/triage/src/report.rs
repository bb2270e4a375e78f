//! Statistics over classified threads

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::Thread;

/// Category counts over the threads that count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    /// Threads seen, counted or not
    pub threads: usize,
    /// Threads that count toward statistics
    pub counted_threads: usize,
    /// Sum of the message counts of counted threads
    pub counted_messages: i64,
    pub non_ping: usize,
    pub demo: usize,
    pub inquiry: usize,
    pub support_ping: usize,
    pub admin_vm: usize,
    pub res_vm: usize,
    pub sales_vm: usize,
    pub finance_vm: usize,
    pub new_org: usize,
    pub sales_ping: usize,
    pub check_in: usize,
    /// Counted threads still carrying an open marker
    pub open: usize,
    /// Counted threads per stat label
    pub stat_labels: BTreeMap<String, usize>,
    /// Counted threads per member label
    pub member_labels: BTreeMap<String, usize>,
}

impl StatsReport {
    pub fn from_threads<'a>(threads: impl IntoIterator<Item = &'a Thread>) -> Self {
        let mut report = Self::default();

        for thread in threads {
            report.threads += 1;
            if !thread.is_good() {
                continue;
            }

            report.counted_threads += 1;
            report.counted_messages += thread.message_count();

            let flags = [
                (thread.is_non_ping(), &mut report.non_ping),
                (thread.is_demo(), &mut report.demo),
                (thread.is_inquiry(), &mut report.inquiry),
                (thread.is_support_ping(), &mut report.support_ping),
                (thread.is_admin_vm(), &mut report.admin_vm),
                (thread.is_res_vm(), &mut report.res_vm),
                (thread.is_sales_vm(), &mut report.sales_vm),
                (thread.is_finance_vm(), &mut report.finance_vm),
                (thread.is_new_org(), &mut report.new_org),
                (thread.is_sales_ping(), &mut report.sales_ping),
                (thread.is_check_in(), &mut report.check_in),
                (!thread.is_closed(), &mut report.open),
            ];
            for (set, counter) in flags {
                if set {
                    *counter += 1;
                }
            }

            for label in thread.stat_labels() {
                *report.stat_labels.entry(label.clone()).or_default() += 1;
            }
            for label in thread.member_labels() {
                *report.member_labels.entry(label.clone()).or_default() += 1;
            }
        }

        report
    }
}
