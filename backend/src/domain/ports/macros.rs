//! `define_port_error!` declares the error enum of a driven port.
//!
//! Adapter failures only carry the text of the underlying I/O or codec error,
//! so every variant holds one `message: String`. The macro adds a
//! constructor per variant named after it in snake_case (`Read` gives
//! `read`) plus a [`message`](#method.message) accessor.

macro_rules! define_port_error {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $summary:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error("{summary}: {message}", summary = $summary)]
                $variant { message: String },
            )+
        }

        impl $name {
            ::paste::paste! {
                $(
                    #[doc = concat!("`", stringify!($variant), "` failure described by `message`.")]
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant { message: message.into() }
                    }
                )+
            }

            /// Underlying failure text, without the summary prefix.
            pub fn message(&self) -> &str {
                match self {
                    $(Self::$variant { message } => message,)+
                }
            }
        }
    };
}

pub(crate) use define_port_error;
