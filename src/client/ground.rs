/// Ground ids on the booking platform, listed in court number order.
pub const GROUND_IDS: [&str; 10] = [
    "1298272433186332673",
    "1298272520994086913",
    "1298272615009411073",
    "1298272709167341570",
    "1298272791098875905",
    "1298273087183183874",
    "1298273175146127362",
    "1298273265650819073",
    "1298273399927267330",
    "1298273500317933570",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ground {
    pub id: String,
    /// 1-based court number shown to users.
    pub index: usize,
}

impl Ground {
    pub fn label(&self) -> String {
        format!("{}号场", self.index)
    }
}

pub fn catalogue<I, S>(ids: I) -> Vec<Ground>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ids.into_iter()
        .enumerate()
        .map(|(i, id)| Ground { id: id.into(), index: i + 1 })
        .collect()
}

pub fn default_catalogue() -> Vec<Ground> {
    catalogue(GROUND_IDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn courts_are_numbered_from_one() {
        let grounds = default_catalogue();
        assert_eq!(grounds.len(), 10);
        assert_eq!(grounds[0].index, 1);
        assert_eq!(grounds[0].label(), "1号场");
        assert_eq!(grounds[9].label(), "10号场");
        assert_eq!(grounds[9].id, "1298273500317933570");
    }
}
