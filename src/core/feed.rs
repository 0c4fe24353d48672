//! Latest-value publish/subscribe feed for the full item set.
//!
//! Single producer (the repository), multiple consumers. Every mutation
//! publishes the complete ordered list, not a diff; a new subscriber
//! immediately receives the latest value. Consumers may miss intermediate
//! emissions but always converge on the final state. Subscribers that have
//! dropped their receiver are pruned on the next publish, so the feed does
//! not leak detached listeners.

use crate::models::item::TimeFlowItem;
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::sync::Mutex;

pub type ItemsReceiver = Receiver<Vec<TimeFlowItem>>;

#[derive(Default)]
pub struct ItemsFeed {
    inner: Mutex<FeedInner>,
}

#[derive(Default)]
struct FeedInner {
    latest: Vec<TimeFlowItem>,
    subscribers: Vec<Sender<Vec<TimeFlowItem>>>,
}

impl ItemsFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe with latest-value replay: the current list is delivered
    /// immediately, then every subsequent publish.
    pub fn subscribe(&self) -> ItemsReceiver {
        let (tx, rx) = unbounded();
        let mut inner = self.inner.lock().unwrap();
        let _ = tx.send(inner.latest.clone());
        inner.subscribers.push(tx);
        rx
    }

    /// Snapshot of the latest published list.
    pub fn latest(&self) -> Vec<TimeFlowItem> {
        self.inner.lock().unwrap().latest.clone()
    }

    pub fn publish(&self, items: Vec<TimeFlowItem>) {
        let mut inner = self.inner.lock().unwrap();
        inner.latest = items;
        let snapshot = inner.latest.clone();
        inner
            .subscribers
            .retain(|tx| tx.send(snapshot.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn item(id: i64, title: &str) -> TimeFlowItem {
        let mut it = TimeFlowItem::new(
            title,
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap(),
            0,
        );
        it.id = id;
        it
    }

    #[test]
    fn subscriber_gets_latest_value_on_subscribe() {
        let feed = ItemsFeed::new();
        feed.publish(vec![item(1, "a")]);

        let rx = feed.subscribe();
        let first = rx.recv().unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].title, "a");
    }

    #[test]
    fn fresh_feed_replays_the_empty_list() {
        let feed = ItemsFeed::new();
        let rx = feed.subscribe();
        assert!(rx.recv().unwrap().is_empty());
    }

    #[test]
    fn serial_publishes_converge_to_the_final_state() {
        let feed = ItemsFeed::new();
        let rx = feed.subscribe();

        // add then immediately remove the same logical item
        feed.publish(vec![item(1, "ephemeral")]);
        feed.publish(vec![]);

        let mut last = None;
        while let Ok(v) = rx.try_recv() {
            last = Some(v);
        }
        assert!(last.unwrap().is_empty());
        assert!(feed.latest().is_empty());
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let feed = ItemsFeed::new();
        {
            let _rx = feed.subscribe();
        } // receiver dropped here

        let rx2 = feed.subscribe();
        feed.publish(vec![item(1, "a")]);

        // The live subscriber still sees the update.
        let mut last = Vec::new();
        while let Ok(v) = rx2.try_recv() {
            last = v;
        }
        assert_eq!(last.len(), 1);
    }
}
