//! Fixed table schema and the statements issued against it.

/// Declared storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
}

impl ColumnType {
    /// JSON schema type name used in generated API documentation.
    pub fn json_type(self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Real => "number",
            ColumnType::Text => "string",
        }
    }
}

/// Column definition.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    /// Column name
    pub name: &'static str,
    /// Declared storage type
    pub ty: ColumnType,
}

const fn column(name: &'static str, ty: ColumnType) -> Column {
    Column { name, ty }
}

const EMPLOYEE_COLUMNS: [Column; 3] = [
    column("name", ColumnType::Text),
    column("role", ColumnType::Text),
    column("salary", ColumnType::Real),
];

const CHILD_COLUMNS: [Column; 3] = [
    column("name", ColumnType::Text),
    column("age", ColumnType::Integer),
    column("history", ColumnType::Text),
];

/// DDL run once when the store is opened.
pub(crate) const SCHEMA_SQL: &str = "
CREATE TABLE employee (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    role TEXT NOT NULL,
    salary REAL NOT NULL
) STRICT;
CREATE TABLE child (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    age INTEGER NOT NULL,
    history TEXT NOT NULL
) STRICT;
";

/// One of the two tables owned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Employee,
    Child,
}

impl Table {
    /// All tables in declaration order.
    pub const ALL: [Table; 2] = [Table::Employee, Table::Child];

    /// SQL table name.
    pub fn name(self) -> &'static str {
        match self {
            Table::Employee => "employee",
            Table::Child => "child",
        }
    }

    /// Human-readable entity name used in messages and documentation.
    pub fn entity(self) -> &'static str {
        match self {
            Table::Employee => "Employee",
            Table::Child => "Child",
        }
    }

    /// Non-id columns in declared order. Write statements bind values in
    /// this order.
    pub fn columns(self) -> &'static [Column] {
        match self {
            Table::Employee => &EMPLOYEE_COLUMNS,
            Table::Child => &CHILD_COLUMNS,
        }
    }

    pub(crate) fn select_all_sql(self) -> &'static str {
        match self {
            Table::Employee => "SELECT id, name, role, salary FROM employee ORDER BY id",
            Table::Child => "SELECT id, name, age, history FROM child ORDER BY id",
        }
    }

    pub(crate) fn select_by_id_sql(self) -> &'static str {
        match self {
            Table::Employee => "SELECT id, name, role, salary FROM employee WHERE id = ?1",
            Table::Child => "SELECT id, name, age, history FROM child WHERE id = ?1",
        }
    }

    pub(crate) fn insert_sql(self) -> &'static str {
        match self {
            Table::Employee => "INSERT INTO employee (name, role, salary) VALUES (?1, ?2, ?3)",
            Table::Child => "INSERT INTO child (name, age, history) VALUES (?1, ?2, ?3)",
        }
    }

    // The id is always the last parameter.
    pub(crate) fn update_sql(self) -> &'static str {
        match self {
            Table::Employee => {
                "UPDATE employee SET name = ?1, role = ?2, salary = ?3 WHERE id = ?4"
            }
            Table::Child => "UPDATE child SET name = ?1, age = ?2, history = ?3 WHERE id = ?4",
        }
    }

    pub(crate) fn delete_sql(self) -> &'static str {
        match self {
            Table::Employee => "DELETE FROM employee WHERE id = ?1",
            Table::Child => "DELETE FROM child WHERE id = ?1",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_statements_bind_every_column() {
        for table in Table::ALL {
            let columns = table.columns().len();
            assert_eq!(table.insert_sql().matches('?').count(), columns);
            assert_eq!(table.update_sql().matches('?').count(), columns + 1);
            for column in table.columns() {
                assert!(table.insert_sql().contains(column.name));
                assert!(table.select_all_sql().contains(column.name));
            }
        }
    }
}
