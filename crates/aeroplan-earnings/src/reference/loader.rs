use super::ReferenceDataError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::hash::Hash;
use std::io::Read;

/// Deserialize every data row of a headed CSV resource, preserving file order.
pub(crate) fn read_rows<R, T>(reader: R, dataset: &'static str) -> Result<Vec<T>, ReferenceDataError>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<T>() {
        let row = record.map_err(|source| ReferenceDataError::Csv { dataset, source })?;
        rows.push(row);
    }

    Ok(rows)
}

/// Load a key to record mapping from a CSV resource.
///
/// `key_fn` picks the lookup key from each raw row and `row_fn` converts the
/// row into the stored record. Later rows replace earlier ones with the same key.
pub(crate) fn load_table<R, T, K, V, KF, RF>(
    reader: R,
    dataset: &'static str,
    key_fn: KF,
    row_fn: RF,
) -> Result<HashMap<K, V>, ReferenceDataError>
where
    R: Read,
    T: DeserializeOwned,
    K: Eq + Hash,
    KF: Fn(&T) -> K,
    RF: Fn(T) -> Result<V, ReferenceDataError>,
{
    let rows: Vec<T> = read_rows(reader, dataset)?;
    let mut table = HashMap::with_capacity(rows.len());
    for row in rows {
        let key = key_fn(&row);
        table.insert(key, row_fn(row)?);
    }
    Ok(table)
}
