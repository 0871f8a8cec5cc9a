//! Protobuf messages and gRPC client stubs for the catalog and ratings services.
//!
//! The `*.v1.rs` files are generated from `proto/` and checked in so that
//! building the service does not require `protoc`.

pub mod catalog {
    pub mod v1 {
        include!("catalog.v1.rs");
    }
}

pub mod ratings {
    pub mod v1 {
        include!("ratings.v1.rs");
    }
}
