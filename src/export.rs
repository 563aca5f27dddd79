use log::info;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::model::Dataset;

pub const CSV_HEADER: [&str; 5] = [
    "country_code",
    "first_name",
    "last_name",
    "wikipedia_url",
    "first_paragraph",
];

/// Pretty JSON with four-space indent. Non-ASCII text is written as-is.
pub fn write_json<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(writer, formatter);
    dataset.serialize(&mut ser)?;
    Ok(())
}

/// Header row, then one row per record across all countries.
pub fn write_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;
    for record in dataset.records() {
        csv_writer.write_record([
            &record.country_code,
            &record.first_name,
            &record.last_name,
            &record.wikipedia_url,
            &record.first_paragraph,
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn to_json_file(dataset: &Dataset, path: &Path) -> Result<()> {
    let mut buf = Vec::new();
    write_json(dataset, &mut buf)?;
    replace_file(path, &buf)?;
    info!("Wrote {} records to {}", dataset.len(), path.display());
    Ok(())
}

pub fn to_csv_file(dataset: &Dataset, path: &Path) -> Result<()> {
    let mut buf = Vec::new();
    write_csv(dataset, &mut buf)?;
    replace_file(path, &buf)?;
    info!("Wrote {} rows to {}", dataset.len(), path.display());
    Ok(())
}

// Write to `<path>.part`, then rename; the temp file never outlives a failure.
fn replace_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".part");
    let written = fs::write(&tmp, contents).and_then(|_| fs::rename(&tmp, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LeaderRecord;

    fn sample() -> Dataset {
        let mut data = Dataset::new();
        data.push(LeaderRecord {
            country_code: "fr".to_string(),
            first_name: "François".to_string(),
            last_name: "Mitterrand".to_string(),
            wikipedia_url: "https://fr.wikipedia.org/wiki/Fran%C3%A7ois_Mitterrand".to_string(),
            first_paragraph: "François Mitterrand, né le 26 octobre 1916 à Jarnac, \"homme d'État\", a, b"
                .to_string(),
        });
        data.push(LeaderRecord {
            country_code: "be".to_string(),
            first_name: "Alexander".to_string(),
            last_name: "De Croo".to_string(),
            wikipedia_url: "https://en.wikipedia.org/wiki/Alexander_De_Croo".to_string(),
            first_paragraph: "Alexander De Croo (born 3 May 1975) is a Belgian politician."
                .to_string(),
        });
        data
    }

    #[test]
    fn json_is_indented_and_keeps_accents() {
        let mut buf = Vec::new();
        write_json(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let head = "{\n    \"fr\": [\n        {\n            \"country_code\": \"fr\"";
        assert!(text.starts_with(head));
        assert!(text.contains("François"));
        assert!(!text.contains("\\u00e7"));
        assert!(text.find("\"fr\"").unwrap() < text.find("\"be\"").unwrap());
    }

    #[test]
    fn csv_has_fixed_header_and_quotes_commas() {
        let mut buf = Vec::new();
        write_csv(&sample(), &mut buf).unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, CSV_HEADER);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 5);
        assert_eq!(&rows[0][4], sample().get("fr").unwrap()[0].first_paragraph);
        assert_eq!(&rows[1][0], "be");
        assert_eq!(&rows[1][2], "De Croo");
    }

    #[test]
    fn empty_dataset_still_writes_header_and_empty_object() {
        let mut csv_buf = Vec::new();
        write_csv(&Dataset::new(), &mut csv_buf).unwrap();
        assert_eq!(String::from_utf8(csv_buf).unwrap().trim_end(), CSV_HEADER.join(","));

        let mut json_buf = Vec::new();
        write_json(&Dataset::new(), &mut json_buf).unwrap();
        assert_eq!(String::from_utf8(json_buf).unwrap(), "{}");
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory sitting where the file should go makes the rename fail.
        let blocked = dir.path().join("leaders_data.json");
        fs::create_dir_all(blocked.join("occupied")).unwrap();

        assert!(matches!(to_json_file(&sample(), &blocked), Err(crate::ScrapeError::Io(_))));
        assert!(!dir.path().join("leaders_data.json.part").exists());
        assert!(blocked.is_dir());
    }

    #[test]
    fn files_land_in_created_directory_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("data").join("leaders_data.json");
        let csv_path = dir.path().join("data").join("leaders_data.csv");

        to_json_file(&sample(), &json_path).unwrap();
        to_csv_file(&sample(), &csv_path).unwrap();

        let json_text = fs::read_to_string(&json_path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json_text).unwrap();
        assert_eq!(parsed["be"][0]["last_name"], "De Croo");
        assert!(csv_path.exists());

        let leftovers = fs::read_dir(dir.path().join("data"))
            .unwrap()
            .filter(|e| e.as_ref().unwrap().file_name().to_string_lossy().ends_with(".part"))
            .count();
        assert_eq!(leftovers, 0);
    }
}
