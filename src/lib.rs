// Crate entry point. Re-export modules so tests and binaries can import them easily.
//
// Responsibilities
// - Only declare and expose modules. No business logic here.

pub mod shared {
    pub mod infrastructure {
        pub mod cache;
        pub mod store;
    }
}

pub mod modules {
    pub mod time_entries {
        pub mod core {
            pub mod codec;
            pub mod entry;
            pub mod timezone;
        }
        pub mod inbound {
            pub mod http;
        }
        pub mod repository;
    }
}

pub mod shell;
