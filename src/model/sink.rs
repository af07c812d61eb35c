use crate::model::structures::rating_snapshot::RatingSnapshot;

/// Receives rating snapshots as the simulation produces them.
pub trait SnapshotSink {
    fn record(&mut self, snapshot: &RatingSnapshot);
}

impl<F> SnapshotSink for F
where
    F: FnMut(&RatingSnapshot)
{
    fn record(&mut self, snapshot: &RatingSnapshot) {
        self(snapshot)
    }
}
