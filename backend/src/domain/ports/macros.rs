//! `define_port_error!`: port error enums with snake_case constructors.
//!
//! Variants are either unit or carry exactly one field. The generated
//! constructor for a field variant accepts `impl Into<T>`, so callers can
//! pass `&str` where the field is a `String`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident $field:ident : $ty:ty) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($field: impl Into<$ty>) -> Self {
                Self::$variant { $field: $field.into() }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $field:ident : $ty:ty } )? => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $field: $ty } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( $field : $ty )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        /// Errors from an imaginary key-value store.
        pub enum StoreError {
            Unreachable => "store unreachable",
            Rejected { reason: String } => "store rejected write: {reason}",
            Throttled { retry_after_secs: u64 } => "retry in {retry_after_secs}s",
        }
    }

    #[rstest]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(StoreError::unreachable(), StoreError::Unreachable);
        assert_eq!(StoreError::unreachable().to_string(), "store unreachable");
    }

    #[rstest]
    fn string_fields_accept_str() {
        let err = StoreError::rejected("duplicate key");
        assert_eq!(
            err,
            StoreError::Rejected {
                reason: "duplicate key".to_owned()
            }
        );
        assert_eq!(err.to_string(), "store rejected write: duplicate key");
    }

    #[rstest]
    fn numeric_fields_keep_their_type() {
        assert_eq!(StoreError::throttled(30_u64).to_string(), "retry in 30s");
    }
}
