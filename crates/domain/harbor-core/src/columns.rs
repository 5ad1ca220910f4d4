use crate::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub label: &'static str,
    pub field: Field,
    pub editable: bool,
}

const fn text_column(field: Field, label: &'static str) -> ColumnDef {
    ColumnDef {
        label,
        field,
        editable: true,
    }
}

/// Result table columns, in display order.
pub const COLUMNS: [ColumnDef; 4] = [
    text_column(Field::Name, "Name"),
    text_column(Field::Length, "Length"),
    text_column(Field::Price, "Price"),
    text_column(Field::Description, "Description"),
];
