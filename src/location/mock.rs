//! Mock location implementation for isolating controllers in tests.

use mockall::mock;

use crate::location::{FlatKv, HistoryMode, LocationReader, LocationWriter};

mock! {
    pub Location {}

    impl LocationReader for Location {
        fn current_query(&self) -> FlatKv;
    }

    impl LocationWriter for Location {
        fn set_current_query(&self, query: &FlatKv, mode: HistoryMode);
    }
}
