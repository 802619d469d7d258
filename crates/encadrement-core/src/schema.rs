/// Arrow schema definitions for the rent regulation dataset.
pub mod dataset {
    use arrow::datatypes::{DataType, Field, Schema};

    pub const YEAR: &str = "annee";
    pub const DISTRICT: &str = "nom_quartier";
    pub const FURNISHING: &str = "meuble_txt";
    pub const ROOM_COUNT: &str = "piece";
    pub const ERA: &str = "epoque";
    pub const MIN_RATE: &str = "min";
    pub const REF_RATE: &str = "ref";
    pub const MAX_RATE: &str = "max";

    /// Normalised column types for regulation records.
    ///
    /// Exports differ in how they type `annee` and `piece` (string or
    /// integer) and may use large string columns; loaders cast each required
    /// column to the type given here before reading values.
    pub fn regulation_schema() -> Schema {
        Schema::new(vec![
            Field::new(YEAR, DataType::Int32, false),
            Field::new(DISTRICT, DataType::Utf8, false),
            Field::new(FURNISHING, DataType::Utf8, false),
            Field::new(ROOM_COUNT, DataType::Int32, false),
            Field::new(ERA, DataType::Utf8, false),
            Field::new(MIN_RATE, DataType::Float64, false),
            Field::new(REF_RATE, DataType::Float64, false),
            Field::new(MAX_RATE, DataType::Float64, false),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::dataset;
    use crate::query::Field;

    #[test]
    fn regulation_schema_has_expected_fields() {
        let schema = dataset::regulation_schema();
        assert_eq!(schema.fields().len(), 8);
        assert!(schema.field_with_name("annee").is_ok());
        assert!(schema.field_with_name("ref").is_ok());
    }

    #[test]
    fn key_fields_are_schema_columns() {
        let schema = dataset::regulation_schema();
        for field in Field::ALL {
            assert!(
                schema.field_with_name(field.column()).is_ok(),
                "missing column for {field}"
            );
        }
    }
}
