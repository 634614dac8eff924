//! Status tables of the advertisement endpoints.

use crate::status::status_table;

status_table! {
    /// Source material endpoints.
    pub enum SourceMaterialStatus: "source material" {
        NotFound = 4440 => "Source material not found",
        NotAllowed = 4441 => "Source material not allowed",
        DoesNotExist = 4448 => "Source material does not exist",
    }
}

status_table! {
    /// Advertisement create, update, bind and removal endpoints.
    pub enum AdvertisementStatus: "advertisement" {
        NotFound = 4450 => "Advertisement not found",
        NotAllowed = 4451 => "Advertisement not allowed",
        InvalidInput = 4452 => "Advertisement invalid input",
        /// The advertisement is still playing on a machine
        RemoveNotAllowed = 4446 => "Advertisement removal not allowed",
    }
}

status_table! {
    /// Advertisement detail lookups.
    pub enum AdDetailStatus: "advertisement detail" {
        NotFound = 4440 => "Advertisement detail not found",
        NotAllowed = 4441 => "Advertisement detail not allowed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusTable;
    use crate::status::tests::assert_table_complete;

    #[test]
    fn test_tables_complete() {
        assert_table_complete::<SourceMaterialStatus>();
        assert_table_complete::<AdvertisementStatus>();
        assert_table_complete::<AdDetailStatus>();
    }

    #[test]
    fn test_shared_codes_resolve_per_table() {
        assert_eq!(SourceMaterialStatus::from_code(4440), SourceMaterialStatus::NotFound);
        assert_eq!(AdDetailStatus::from_code(4440), AdDetailStatus::NotFound);
        assert_eq!(
            AdvertisementStatus::from_code(4440),
            AdvertisementStatus::Unknown(4440)
        );
    }
}
