//! A personal-finance ledger: income and expense entries, running totals and
//! a filtered, searchable listing, persisted as a CSV snapshot.

pub mod app;
pub mod config;
pub mod view;

pub mod common {
    pub mod command;
    pub mod error;
    pub mod money;
}

pub mod domain {
    pub mod entry;
    pub mod ledger;
}

pub mod io {
    pub mod reader;
    pub mod store;
    pub mod writer;
}

pub mod worker {
    pub mod processor;
    pub mod handlers {
        pub mod add;
        pub mod clear;
        pub mod remove;
    }
}
