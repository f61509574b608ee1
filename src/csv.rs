use serde::{de::DeserializeOwned, Serialize};

/// Serializes `items` into CSV, with a header derived from the first item
/// # Error
/// Errors if an item cannot be serialized
pub fn serialize(items: impl Iterator<Item = impl Serialize>) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for item in items {
        wtr.serialize(item)?;
    }
    wtr.into_inner().map_err(|e| e.into_error().into())
}

/// Deserializes rows of a CSV with a header
pub fn deserialize<'a, D: DeserializeOwned + 'a>(
    data: &'a [u8],
) -> impl Iterator<Item = Result<D, csv::Error>> + 'a {
    let rdr = csv::ReaderBuilder::new()
        .delimiter(b',')
        .trim(csv::Trim::All)
        .from_reader(std::io::Cursor::new(data));
    rdr.into_deserialize()
}
