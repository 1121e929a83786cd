//! Order-form record schema.
//!
//! Every record carries the same fixed, ordered set of string columns. The
//! column order drives CSV headers and XML child order, and the names are
//! kept exactly as downstream consumers expect them (including historical
//! spellings such as `PloicyNo`).

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Defines [`Field`], [`FIELD_NAMES`] and [`FIELD_COUNT`] from one table so
/// the enum and the column names can never drift apart.
macro_rules! record_schema {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// A column of the order-form record schema, in canonical order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Field {
            $(
                #[doc = concat!("`", $name, "` column.")]
                $variant,
            )+
        }

        /// Column names in canonical order.
        pub const FIELD_NAMES: [&str; FIELD_COUNT] = [$($name),+];

        /// Number of columns in the schema.
        pub const FIELD_COUNT: usize = [$($name),+].len();

        impl Field {
            /// All columns in canonical order.
            pub const ALL: [Field; FIELD_COUNT] = [$(Field::$variant),+];

            /// Column name as written in CSV headers and XML tags.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Field::$variant => $name,)+
                }
            }
        }
    };
}

record_schema! {
    ImageName => "ImageName",
    RecordNo => "RecordNo",
    ConfidenceScore => "ConfidenceScore",
    CustomerName => "CustomerName",
    EmailAddress => "EmailAddress",
    ResAddress => "ResAddress",
    City1 => "City_1",
    State1 => "State_1",
    Zip1 => "Zip_1",
    PhNo1 => "PhNo_1",
    Country1 => "Country_1",
    Sex1 => "Sex_1",
    DBirth => "D_Birth",
    Height => "Height",
    Weight => "Weight",
    BloodGroup => "Blood_Group",
    Alcoholic => "Alcoholic",
    Smoker => "Smoker",
    PastSug => "PastSug",
    Diabetic => "Diabetic",
    Allergiesd => "Allergiesd",
    BillingName => "BillingName",
    ShipperName => "ShipperName",
    City2 => "City_2",
    State2 => "State_2",
    Zip2 => "Zip_2",
    Country2 => "Country_2",
    PhNo2 => "PhNo_2",
    CardName => "CardName",
    ShippingCost => "ShippingCost",
    TotalAmount => "TotalAmount",
    Remarks => "Remarks",
    PloicyNo => "PloicyNo",
    DBLifeAssure => "D_B_Life_Assure",
    PInst => "P_Inst",
    NamePHolder => "Name_P_Holder",
    StmName => "STM_Name",
    StmCode => "STM_Code",
    Medicine => "Medicine",
    Dosage => "Dosage",
    Tablets => "Tablets",
    PillRate => "PillRate",
    Cost => "Cost",
    Dob => "DOB",
    Sex2 => "Sex_2",
    UserId => "UserID",
    CreateDate => "CreateDate",
    UpdateDate => "UpdateDate",
}

impl Field {
    /// Position of this column in canonical order.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a column by its schema name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Columns that carry the same semantic value as this one.
    ///
    /// The schema feeds several downstream systems, each with its own copy
    /// of a few values. Aliases are metadata only; the extractor fills them
    /// as documented per field.
    pub fn aliases(self) -> &'static [Field] {
        match self {
            Field::Dob => &[Field::DBirth],
            Field::DBirth => &[Field::Dob],
            Field::CustomerName => &[Field::BillingName, Field::ShipperName, Field::NamePHolder],
            Field::BillingName | Field::ShipperName | Field::NamePHolder => &[Field::CustomerName],
            Field::Sex1 => &[Field::Sex2],
            Field::Sex2 => &[Field::Sex1],
            _ => &[],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anchor columns reported by [`OrderRecord::missing_key_fields`].
pub const KEY_FIELDS: [Field; 3] = [Field::UserId, Field::EmailAddress, Field::CustomerName];

/// Patient sex as printed on the order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "MALE",
            Sex::Female => "FEMALE",
        }
    }
}

/// One structured extraction result.
///
/// Values are plain strings; absence is the empty string. Records are built
/// by the extractor and read-only afterwards: [`OrderRecord::with_field`]
/// returns an edited copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    values: [String; FIELD_COUNT],
}

impl OrderRecord {
    /// Create an empty record for `image_name` with sequence number `record_no`.
    pub fn new(image_name: &str, record_no: u32) -> Self {
        let mut record = Self {
            values: std::array::from_fn(|_| String::new()),
        };
        record.set(Field::ImageName, image_name);
        record.set(Field::RecordNo, record_no.to_string());
        record.set(Field::ConfidenceScore, "0%");
        record
    }

    /// Value of a column (empty when not extracted).
    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub(crate) fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// Return a copy of this record with one column replaced.
    pub fn with_field(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Whether a column is empty.
    pub fn is_blank(&self, field: Field) -> bool {
        self.values[field.index()].is_empty()
    }

    /// Values in canonical column order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// `(column, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL.iter().map(move |&f| (f, self.get(f)))
    }

    pub fn image_name(&self) -> &str {
        self.get(Field::ImageName)
    }

    /// Sequence number, if the `RecordNo` column still holds one.
    pub fn record_no(&self) -> Option<u32> {
        self.get(Field::RecordNo).parse().ok()
    }

    /// Anchor columns that are empty in this record.
    pub fn missing_key_fields(&self) -> Vec<Field> {
        KEY_FIELDS
            .iter()
            .copied()
            .filter(|&f| self.is_blank(f))
            .collect()
    }
}

impl Serialize for OrderRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FIELD_COUNT))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.name(), value)?;
        }
        map.end()
    }
}
