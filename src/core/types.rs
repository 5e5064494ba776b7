use std::fmt;

/// Ordered, immutable list of raw address strings.
///
/// Loaded once at startup and only ever borrowed afterwards; every task in
/// the fork-join tree reads from the same list without synchronization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressList {
    addresses: Vec<String>,
}

impl AddressList {
    /// Create an address list from already-split lines.
    ///
    /// # Examples
    /// ```
    /// use siteverify::core::types::AddressList;
    ///
    /// let list = AddressList::from_lines(vec!["http://a.test/", "", "b"]);
    /// assert_eq!(list.len(), 3);
    /// assert_eq!(list.get(1), Some(""));
    /// ```
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            addresses: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Split text into addresses, one per line.
    ///
    /// Both `\n` and `\r\n` terminate a line. Empty lines are kept as literal
    /// (empty) addresses; a final line terminator does not add an entry.
    pub fn parse(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.addresses.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.addresses.iter().map(String::as_str)
    }
}

impl fmt::Display for AddressList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} address(es)", self.addresses.len())
    }
}
