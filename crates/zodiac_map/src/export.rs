use crate::error::{MapToolError, Result};
use chrono::Local;
use csv::WriterBuilder;
use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};
use zodiac_engine::{Person, Sign};

const HEADER: [&str; 5] = ["Name", "Sign", "Nearest Sector", "X", "Y"];

fn sign_cell(sign: Sign) -> String {
    let info = sign.info();
    format!("{} {}", info.symbol, info.name)
}

/// Writes the placed people, in placement order, to a timestamped CSV file.
pub fn export_placed_table(placed: &[Person], output_dir: Option<&Path>) -> Result<PathBuf> {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let filename = format!("placed_{timestamp}.csv");

    let file_path = if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir).map_err(|e| MapToolError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
        dir.join(&filename)
    } else {
        filename.into()
    };

    let file = File::create(&file_path).map_err(|e| MapToolError::CreateFile {
        path: file_path.clone(),
        source: e,
    })?;

    let writer = BufWriter::new(file);
    #[allow(unused_mut)]
    let mut builder = WriterBuilder::new();
    #[cfg(windows)]
    {
        use csv::Terminator;
        builder = builder.terminator(Terminator::CRLF);
    }

    let mut wtr = builder.from_writer(writer);
    wtr.write_record(HEADER)?;

    for person in placed {
        let Some(pos) = person.position else {
            continue;
        };
        let nearest = person
            .placed_opposite_sign
            .map(sign_cell)
            .unwrap_or_default();
        wtr.write_record([
            person.name.clone(),
            sign_cell(person.sign),
            nearest,
            format!("{:.1}", pos.x),
            format!("{:.1}", pos.y),
        ])?;
    }

    wtr.flush()?;
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use zodiac_engine::{MapGeometry, MemoryStore, PlacementStore, Point};

    fn placed_people() -> Vec<Person> {
        let mut store = PlacementStore::open(MemoryStore::new(), MapGeometry::default()).unwrap();
        let a = store.add_person("Alice", "Leo").unwrap();
        let b = store.add_person("Bob, Jr.", "Aries").unwrap();
        store.add_person("Unplaced", "Virgo").unwrap();
        store.place_person(&b.id, Point::new(650.0, 1060.0)).unwrap();
        store.place_person(&a.id, Point::new(1060.0, 650.0)).unwrap();
        store.placed().to_vec()
    }

    #[test]
    fn test_export_table_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = export_placed_table(&placed_people(), Some(temp_dir.path())).unwrap();

        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("placed_"));
        assert!(name.ends_with(".csv"));

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Name,Sign,Nearest Sector,X,Y");
        assert_eq!(lines.len(), 3);
        // placement order, quoted comma
        assert_eq!(lines[1], "\"Bob, Jr.\",♈ 牡羊座,♎ 天秤座,650.0,1060.0");
        assert_eq!(lines[2], "Alice,♌ 獅子座,♋ 蟹座,1060.0,650.0");
    }

    #[test]
    fn test_export_empty_table() {
        let temp_dir = TempDir::new().unwrap();
        let path = export_placed_table(&[], Some(temp_dir.path().join("nested").as_path())).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Name,Sign,Nearest Sector,X,Y\n");
    }

    #[test]
    fn test_invalid_output_directory() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let err = export_placed_table(&[], Some(blocker.join("sub").as_path())).unwrap_err();
        assert!(matches!(err, MapToolError::CreateDir { .. }));
    }
}
