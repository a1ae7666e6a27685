/// Registry of admitted player names. Keeps the table free of blank names,
/// the reserved dealer name, and case-insensitive duplicates.
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self { names: Vec::new() }
    }

    pub fn admit(&mut self, name: &str) -> Result<(), &'static str> {
        if name.is_empty() {
            return Err("Names must have at least one character. Please try again.");
        }
        if name.eq_ignore_ascii_case("dealer") {
            return Err("Name 'Dealer' is reserved. Please select another.");
        }
        if self.names.iter().any(|taken| taken.eq_ignore_ascii_case(name)) {
            return Err("Name already taken. Please select another.");
        }
        self.names.push(name.to_string());
        Ok(())
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}
