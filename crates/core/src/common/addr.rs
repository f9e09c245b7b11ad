//! Decoded DRAM address fields.
//!
//! Each level of the DRAM hierarchy gets its own index type so a row can never be
//! passed where a bank is expected. The address decoder that produces these values
//! from a physical address lives outside this crate.

use std::fmt;

macro_rules! index_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $name {
            /// Creates the index from its raw value.
            #[inline]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Returns the raw index value.
            #[inline]
            pub const fn id(self) -> u32 {
                self.0
            }

            /// Returns the index as a `usize`, for indexing per-level tables.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

index_type!(
    /// Memory channel index.
    Channel
);
index_type!(
    /// Rank index within a channel.
    Rank
);
index_type!(
    /// Bank group index within a channel.
    BankGroup
);
index_type!(
    /// Bank index, flat across all ranks of one channel
    /// (`rank * banks_per_rank + bank_in_rank`).
    Bank
);
index_type!(
    /// Row index within a bank.
    Row
);
index_type!(
    /// Column index within a row.
    Column
);

/// A physical address split into its DRAM coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DecodedAddress {
    /// Target channel.
    pub channel: Channel,
    /// Target rank.
    pub rank: Rank,
    /// Target bank group.
    pub bank_group: BankGroup,
    /// Target bank (flat index within the channel).
    pub bank: Bank,
    /// Target row.
    pub row: Row,
    /// Target column.
    pub column: Column,
}

impl DecodedAddress {
    /// Creates an address in channel 0, rank 0, bank group 0 that targets `bank`/`row`/`column`.
    ///
    /// Sufficient for single-rank configurations; set the remaining fields directly
    /// for larger topologies.
    pub const fn new(bank: Bank, row: Row, column: Column) -> Self {
        Self {
            channel: Channel(0),
            rank: Rank(0),
            bank_group: BankGroup(0),
            bank,
            row,
            column,
        }
    }
}

impl fmt::Display for DecodedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ch{}/ra{}/bg{}/ba{}/row{}/col{}",
            self.channel, self.rank, self.bank_group, self.bank, self.row, self.column
        )
    }
}
