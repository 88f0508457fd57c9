#[cfg(test)]
mod tests {
    use hull::{Entity, Registry, Related, Status, Value};

    #[derive(Entity, Debug)]
    struct Author {
        id: i64,
        _name: String,
        #[hull(name = "mail")]
        email: Option<String>,
        #[hull(skip)]
        cached: u32,
        status: Status,
        books: Related<Book>,
    }

    #[derive(Entity, Debug)]
    #[hull(name = "library_books")]
    struct Book {
        #[hull(primary_key)]
        isbn: String,
        #[hull(references = Author)]
        author: i64,
        #[hull(references = "shelves")]
        shelf: Option<i32>,
        title: String,
        state: Status,
    }

    #[derive(Entity, Debug)]
    struct Category {
        id: i32,
        #[hull(references = Category)]
        parent: Option<i32>,
        name: String,
        status: Status,
        children: Related<Category>,
    }

    mod warehouse {
        use hull::{Entity, Status};

        #[derive(Entity, Debug)]
        pub struct Item {
            pub id: i64,
            pub name: String,
            pub status: Status,
        }
    }

    mod catalog {
        use hull::{Entity, Status};

        #[derive(Entity, Debug)]
        #[hull(name = "catalog_item")]
        pub struct Item {
            pub id: i64,
            pub price: f64,
            pub status: Status,
        }
    }

    #[test]
    fn table_model() {
        let table = Author::table();
        assert_eq!(table.name, "author");
        assert_eq!(table.type_name, "Author");
        assert_eq!(table.primary_key, "id");
        assert_eq!(table.field_names().collect::<Vec<_>>(), ["id", "name", "mail"]);
        assert!(matches!(table.columns[0].value, Value::Int64(None)));
        assert!(table.columns[0].primary_key);
        assert!(!table.columns[1].nullable);
        assert!(table.columns[2].nullable);
        assert!(!table.has_column("cached"));
        assert!(!table.has_column("books"));

        let table = Book::table();
        assert_eq!(table.name, "library_books");
        assert_eq!(table.primary_key, "isbn");
        assert_eq!(table.columns[1].references, Some("author"));
        assert_eq!(table.columns[2].references, Some("shelves"));
        assert_eq!(table.columns[3].references, None);
        assert_eq!(
            table.foreign_key_to("author").map(|c| c.name),
            Some("author")
        );
        assert!(table.foreign_key_to("shelf").is_none());
        assert!(table.validate().is_ok());
    }

    #[test]
    fn values() {
        let mut author = Author::new_instance();
        assert_eq!(author.status(), Status::New);
        author
            .set_values([
                Value::Int64(Some(7)),
                Value::Varchar(Some("Ursula".into())),
                Value::Null,
            ])
            .expect("Could not set the values");
        assert_eq!(author.id, 7);
        assert_eq!(author._name, "Ursula");
        assert_eq!(author.email, None);
        assert_eq!(author.cached, 0);
        assert_eq!(author.primary_key(), Value::Int64(Some(7)));
        assert_eq!(
            &*author.row(),
            [
                Value::Int64(Some(7)),
                Value::Varchar(Some("Ursula".into())),
                Value::Varchar(None),
            ]
        );

        // Integers of any width are accepted when they fit
        let book = Book::from_values([
            Value::Varchar(Some("978-0".into())),
            Value::Int32(Some(7)),
            Value::Int64(Some(3)),
            Value::Varchar(Some("The Dispossessed".into())),
        ])
        .expect("Could not build the book");
        assert_eq!(book.author, 7);
        assert_eq!(book.shelf, Some(3));
        assert_eq!(book.primary_key(), Value::Varchar(Some("978-0".into())));

        assert!(
            Book::from_values([Value::Varchar(Some("978-1".into()))]).is_err(),
            "Missing values must be reported"
        );
        assert!(
            Book::from_values([
                Value::Varchar(Some("978-1".into())),
                Value::Varchar(Some("not a number".into())),
                Value::Null,
                Value::Varchar(Some("Title".into())),
            ])
            .is_err()
        );
    }

    #[test]
    fn relations() {
        let mut author = Author::new_instance();
        let books = author.relation_mut(0).expect("Author has a relation");
        assert_eq!(books.child_type(), "Book");
        assert!(books.is_empty());
        assert_eq!(books.child_path(), Book::table().type_path);
        books
            .attach(
                &Value::Int64(Some(1)),
                &mut [
                    Value::Varchar(Some("978-2".into())),
                    Value::Int64(Some(1)),
                    Value::Null,
                    Value::Varchar(Some("Lathe".into())),
                ]
                .into_iter(),
            )
            .expect("Could not attach the book");
        assert!(author.relation_mut(1).is_none());
        assert_eq!(author.books.len(), 1);
        assert_eq!(author.books.owner(), Some(&Value::Int64(Some(1))));
        let book = author.books.get(0).expect("The book was attached");
        assert_eq!(book.title, "Lathe");
        assert_eq!(book.state, Status::Fetched);
        let mut book = Book::new_instance();
        assert!(book.relation_mut(0).is_none());
    }

    #[test]
    fn registry() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());
        let tag = registry
            .register::<Author>()
            .expect("Could not register Author")
            .type_tag;
        assert_eq!(tag, 1);
        registry.register::<Book>().expect("Could not register Book");
        assert_eq!(
            registry
                .register::<Author>()
                .expect("Registering again is allowed")
                .type_tag,
            1
        );
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.table_name_for_type("Book"), Some("library_books"));
        assert_eq!(
            registry.model_for_table("author").map(|t| t.type_name),
            Some("Author")
        );
        assert_eq!(registry.model_for_tag(2).map(|t| t.name), Some("library_books"));
        assert!(registry.model_for_type("Shelf").is_none());

        #[derive(Entity)]
        #[hull(name = "author")]
        struct Impostor {
            id: i64,
            status: Status,
        }
        assert!(registry.register::<Impostor>().is_err());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn self_reference() {
        let table = Category::table();
        assert_eq!(Category::table_name(), "category");
        assert_eq!(table.columns[1].references, Some("category"));
        assert_eq!(
            table.foreign_key_to("category").map(|c| c.name),
            Some("parent")
        );
        let mut category = Category::new_instance();
        let children = category.relation_mut(0).expect("Category has a relation");
        assert_eq!(children.child_path(), table.type_path);
    }

    #[test]
    fn same_name_in_different_modules() {
        let (first, second) = (warehouse::Item::table(), catalog::Item::table());
        assert_eq!(first.type_name, second.type_name);
        assert_ne!(first.type_path, second.type_path);
        assert!(!first.same_type(second));

        let mut registry = Registry::new();
        registry
            .register::<warehouse::Item>()
            .expect("Could not register the warehouse item");
        assert!(
            registry.register::<catalog::Item>().is_err(),
            "The short name `Item` would be ambiguous"
        );
        assert_eq!(registry.len(), 1);
        assert!(registry.model_for::<catalog::Item>().is_none());
        assert_eq!(
            registry.model_for::<warehouse::Item>().map(|t| t.name),
            Some("item")
        );
        assert_eq!(
            registry
                .register::<warehouse::Item>()
                .expect("Registering again is allowed")
                .type_tag,
            1
        );

        let mut registry = Registry::new();
        registry
            .register::<catalog::Item>()
            .expect("Could not register the catalog item");
        assert_eq!(
            registry.model_for_type("Item").map(|t| t.name),
            Some("catalog_item")
        );
    }
}
