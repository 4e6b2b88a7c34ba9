//! Error types for the percolation core library.
//!
//! Every failure belongs to one of two coarse [`ErrorKind`]s: an invalid size
//! or configuration argument, or an index outside its valid range. Each variant
//! also carries a stable machine-readable [`PercolationErrorCode`].

use std::fmt;

use thiserror::Error;

use crate::experiment::ExecutionStrategy;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => ($kind:ident, $code:expr)
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }

            /// Return the coarse category this code belongs to.
            #[must_use]
            pub const fn kind(self) -> ErrorKind {
                match self {
                    $(Self::$CodeVariant => ErrorKind::$kind,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }

            /// Return the coarse category of this error.
            #[must_use]
            pub const fn kind(&self) -> ErrorKind {
                self.code().kind()
            }
        }
    };
}

/// Coarse error categories shared by every component.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// A size or configuration parameter was rejected at construction time.
    InvalidArgument,
    /// A row, column or element index fell outside its valid range.
    IndexOutOfBounds,
}

/// Error type produced by the percolation grid, the union-find structure and
/// the threshold estimator.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PercolationError {
    /// The grid dimension must be at least 1.
    #[error("grid size must be at least 1 (got {got})")]
    InvalidGridSize {
        /// The rejected grid dimension.
        got: usize,
    },
    /// The number of trials must be at least 1.
    #[error("trial count must be at least 1 (got {got})")]
    InvalidTrialCount {
        /// The rejected trial count.
        got: usize,
    },
    /// A union-find structure needs at least one element.
    #[error("union-find universe must contain at least one element")]
    EmptyUniverse,
    /// The grid would need more elements than can be addressed or allocated.
    #[error("grid size {size} exceeds the addressable element space")]
    GridTooLarge {
        /// The requested grid dimension.
        size: usize,
    },
    /// The union-find buffers for `len` elements could not be allocated.
    #[error("union-find universe of {len} elements cannot be allocated")]
    UniverseTooLarge {
        /// Requested universe size.
        len: usize,
    },
    /// Statistics were requested over an empty sample set.
    #[error("threshold statistics need at least one sample")]
    EmptySamples,
    /// A site coordinate fell outside `1..=size`.
    #[error("site ({row}, {col}) is outside the 1..={size} grid")]
    SiteOutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Grid dimension.
        size: usize,
    },
    /// A raw element index fell outside the union-find universe.
    #[error("element {index} is out of bounds for a universe of {len}")]
    ElementOutOfBounds {
        /// Requested element.
        index: usize,
        /// Number of elements in the universe.
        len: usize,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
}

define_error_codes! {
    /// Stable codes describing [`PercolationError`] variants.
    enum PercolationErrorCode for PercolationError {
        /// The grid dimension must be at least 1.
        InvalidGridSize => InvalidGridSize { .. } => (InvalidArgument, "PERCOLATION_INVALID_GRID_SIZE"),
        /// The number of trials must be at least 1.
        InvalidTrialCount => InvalidTrialCount { .. } => (InvalidArgument, "PERCOLATION_INVALID_TRIAL_COUNT"),
        /// A union-find structure needs at least one element.
        EmptyUniverse => EmptyUniverse => (InvalidArgument, "PERCOLATION_EMPTY_UNIVERSE"),
        /// The grid would need more elements than can be addressed or allocated.
        GridTooLarge => GridTooLarge { .. } => (InvalidArgument, "PERCOLATION_GRID_TOO_LARGE"),
        /// The union-find buffers could not be allocated.
        UniverseTooLarge => UniverseTooLarge { .. } => (InvalidArgument, "PERCOLATION_UNIVERSE_TOO_LARGE"),
        /// Statistics were requested over an empty sample set.
        EmptySamples => EmptySamples => (InvalidArgument, "PERCOLATION_EMPTY_SAMPLES"),
        /// A site coordinate fell outside the grid.
        SiteOutOfBounds => SiteOutOfBounds { .. } => (IndexOutOfBounds, "PERCOLATION_SITE_OUT_OF_BOUNDS"),
        /// A raw element index fell outside the union-find universe.
        ElementOutOfBounds => ElementOutOfBounds { .. } => (IndexOutOfBounds, "PERCOLATION_ELEMENT_OUT_OF_BOUNDS"),
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => (InvalidArgument, "PERCOLATION_BACKEND_UNAVAILABLE"),
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, PercolationError>;
