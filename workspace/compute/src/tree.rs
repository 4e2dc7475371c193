use common::{CategoryTotals, CategoryTree};
use model::entities::{amount, category, project};
use sea_orm::DatabaseConnection;
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};
use crate::monthly;
use crate::window::MonthWindow;

/// Name displayed for the synthesized project root.
pub const ROOT_NAME: &str = "Main";

/// Identifies the node a tree query is rooted at: either the project itself
/// (the implicit root, never persisted) or a stored category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryRef {
    Root,
    Id(i32),
}

/// Computes one level of the category tree, with every node's totals rolled
/// up over that node's whole subtree.
#[derive(Debug, Default)]
pub struct CategoryTreeBuilder;

impl CategoryTreeBuilder {
    /// Creates a new CategoryTreeBuilder instance.
    pub fn new() -> Self {
        Self
    }

    /// Builds the tree level rooted at `node` for the given month window.
    ///
    /// The queried node's totals cover its full transitive closure: its own
    /// directly-attributed amounts plus those of every descendant category
    /// (for the root, every amount of the project). Each direct child is
    /// reported with its own subtree rollup, one level down. A node without
    /// children short-circuits to its directly-attributed amounts, which is
    /// the same set as its closure.
    #[instrument(skip(self, db, project, window), fields(project_id = project.id))]
    pub async fn build(
        &self,
        db: &DatabaseConnection,
        project: &project::Model,
        node: CategoryRef,
        window: &MonthWindow,
    ) -> Result<CategoryTree> {
        let (node_totals, children) = match node {
            CategoryRef::Root => {
                let children = category::Model::top_level(db, project.id).await?;
                let amounts = if children.is_empty() {
                    amount::Model::for_project_root(db, project.id).await?
                } else {
                    amount::Model::for_project(db, project.id).await?
                };
                debug!("root rollup over {} amounts", amounts.len());
                (
                    CategoryTotals {
                        id: None,
                        name: ROOT_NAME.to_string(),
                        totals: monthly::totals_for(&amounts, window),
                    },
                    children,
                )
            }
            CategoryRef::Id(id) => {
                let cat = category::Model::fetch(db, id).await?;
                if cat.project_id != project.id {
                    return Err(ComputeError::CategoryNotFound(id));
                }

                let children = cat.direct_children(db).await?;
                let amounts = if children.is_empty() {
                    amount::Model::for_category(db, cat.id).await?
                } else {
                    amount::Model::for_category_subtree(db, &cat).await?
                };
                debug!("category {} rollup over {} amounts", cat.id, amounts.len());
                (
                    CategoryTotals {
                        id: Some(cat.id),
                        name: cat.name.clone(),
                        totals: monthly::totals_for(&amounts, window),
                    },
                    children,
                )
            }
        };

        let mut sub_categories = Vec::with_capacity(children.len());
        for child in children {
            let amounts = amount::Model::for_category_subtree(db, &child).await?;
            sub_categories.push(CategoryTotals {
                id: Some(child.id),
                name: child.name,
                totals: monthly::totals_for(&amounts, window),
            });
        }

        Ok(CategoryTree {
            node: node_totals,
            sub_categories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{day, new_category, new_one_off, new_planned, new_project, setup_db};
    use common::MonthlyTotals;
    use rust_decimal::Decimal;

    fn dec(v: i64) -> Decimal {
        Decimal::new(v, 0)
    }

    #[tokio::test]
    async fn test_three_level_rollup() {
        let db = setup_db().await.unwrap();
        let project = new_project(&db).await.unwrap();

        // Main ── Food ── Groceries ── Market
        //      └─ Food ── Eating out
        let food = new_category(&db, &project, "Food", None).await.unwrap();
        let groceries = new_category(&db, &project, "Groceries", Some(food.id)).await.unwrap();
        let eating_out = new_category(&db, &project, "Eating out", Some(food.id)).await.unwrap();
        let market = new_category(&db, &project, "Market", Some(groceries.id)).await.unwrap();

        let at = day(2024, 1, 10);
        new_one_off(&db, &project, None, 5, false, at).await.unwrap();
        new_one_off(&db, &project, Some(food.id), 10, false, at).await.unwrap();
        new_one_off(&db, &project, Some(groceries.id), 20, false, at).await.unwrap();
        new_one_off(&db, &project, Some(market.id), 40, false, at).await.unwrap();
        new_one_off(&db, &project, Some(eating_out.id), 80, false, at).await.unwrap();

        let window = MonthWindow::resolve(day(2024, 1, 15), 0);
        let builder = CategoryTreeBuilder::new();

        // Root level: everything reachable from the project.
        let tree = builder.build(&db, &project, CategoryRef::Root, &window).await.unwrap();
        assert_eq!(tree.node.id, None);
        assert_eq!(tree.node.name, ROOT_NAME);
        assert_eq!(tree.node.totals.used, dec(155));
        assert_eq!(tree.sub_categories.len(), 1);
        assert_eq!(tree.sub_categories[0].id, Some(food.id));
        assert_eq!(tree.sub_categories[0].totals.used, dec(150));

        // Mid level: each child already rolls up its own subtree.
        let tree = builder
            .build(&db, &project, CategoryRef::Id(food.id), &window)
            .await
            .unwrap();
        assert_eq!(tree.node.totals.used, dec(150));
        let by_id = |id| {
            tree.sub_categories
                .iter()
                .find(|c| c.id == Some(id))
                .unwrap()
                .totals
                .clone()
        };
        assert_eq!(by_id(groceries.id).used, dec(60));
        assert_eq!(by_id(eating_out.id).used, dec(80));

        // Bottom level: a leaf child.
        let tree = builder
            .build(&db, &project, CategoryRef::Id(groceries.id), &window)
            .await
            .unwrap();
        assert_eq!(tree.node.totals.used, dec(60));
        assert_eq!(tree.sub_categories.len(), 1);
        assert_eq!(tree.sub_categories[0].totals.used, dec(40));
    }

    #[tokio::test]
    async fn test_children_keep_insertion_order() {
        let db = setup_db().await.unwrap();
        let project = new_project(&db).await.unwrap();

        let zebra = new_category(&db, &project, "Zebra", None).await.unwrap();
        let apple = new_category(&db, &project, "Apple", None).await.unwrap();

        let window = MonthWindow::resolve(day(2024, 1, 15), 0);
        let tree = CategoryTreeBuilder::new()
            .build(&db, &project, CategoryRef::Root, &window)
            .await
            .unwrap();

        let ids: Vec<_> = tree.sub_categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![Some(zebra.id), Some(apple.id)]);
    }

    #[tokio::test]
    async fn test_leaf_short_circuit_matches_general_path() {
        let db = setup_db().await.unwrap();
        let project = new_project(&db).await.unwrap();

        let leaf = new_category(&db, &project, "Leaf", None).await.unwrap();
        new_one_off(&db, &project, Some(leaf.id), 33, false, day(2024, 1, 10)).await.unwrap();
        new_planned(&db, &project, Some(leaf.id), 7, true, day(2024, 1, 1), None)
            .await
            .unwrap();

        let window = MonthWindow::resolve(day(2024, 1, 15), 0);
        let tree = CategoryTreeBuilder::new()
            .build(&db, &project, CategoryRef::Id(leaf.id), &window)
            .await
            .unwrap();
        assert!(tree.sub_categories.is_empty());

        // The degenerate closure of a leaf is its direct amounts, so the
        // short-circuit must be indistinguishable from the recursive path.
        let closure = model::entities::amount::Model::for_category_subtree(&db, &leaf)
            .await
            .unwrap();
        let general = monthly::totals_for(&closure, &window);
        assert_eq!(tree.node.totals, general);
        assert_eq!(tree.node.totals.used, dec(33));
        assert_eq!(tree.node.totals.planned_gain, dec(7));
    }

    #[tokio::test]
    async fn test_planned_amounts_roll_forward() {
        let db = setup_db().await.unwrap();
        let project = new_project(&db).await.unwrap();

        let food = new_category(&db, &project, "Food", None).await.unwrap();
        new_one_off(&db, &project, Some(food.id), 50, false, day(2024, 1, 5)).await.unwrap();
        new_planned(&db, &project, Some(food.id), 20, false, day(2024, 1, 1), None)
            .await
            .unwrap();

        let builder = CategoryTreeBuilder::new();
        let reference = day(2024, 1, 15);

        let january = builder
            .build(&db, &project, CategoryRef::Id(food.id), &MonthWindow::resolve(reference, 0))
            .await
            .unwrap();
        assert_eq!(january.node.totals.used, dec(50));
        assert_eq!(january.node.totals.planned_used, dec(20));
        assert_eq!(january.node.totals.left, dec(-70));

        let february = builder
            .build(&db, &project, CategoryRef::Id(food.id), &MonthWindow::resolve(reference, 1))
            .await
            .unwrap();
        assert_eq!(february.node.totals.used, Decimal::ZERO);
        assert_eq!(february.node.totals.planned_used, dec(20));
        assert_eq!(february.node.totals.left, dec(-20));
    }

    #[tokio::test]
    async fn test_empty_project_root() {
        let db = setup_db().await.unwrap();
        let project = new_project(&db).await.unwrap();

        let window = MonthWindow::resolve(day(2024, 1, 15), 0);
        let tree = CategoryTreeBuilder::new()
            .build(&db, &project, CategoryRef::Root, &window)
            .await
            .unwrap();

        assert_eq!(tree.node.name, ROOT_NAME);
        assert_eq!(tree.node.totals, MonthlyTotals::default());
        assert!(tree.sub_categories.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_category_is_not_found() {
        let db = setup_db().await.unwrap();
        let project = new_project(&db).await.unwrap();

        let window = MonthWindow::resolve(day(2024, 1, 15), 0);
        let err = CategoryTreeBuilder::new()
            .build(&db, &project, CategoryRef::Id(404), &window)
            .await
            .unwrap_err();
        assert!(matches!(err, ComputeError::CategoryNotFound(404)));
    }

    #[tokio::test]
    async fn test_category_of_other_project_is_not_found() {
        let db = setup_db().await.unwrap();
        let project = new_project(&db).await.unwrap();
        let other = new_project(&db).await.unwrap();
        let foreign = new_category(&db, &other, "Foreign", None).await.unwrap();

        let window = MonthWindow::resolve(day(2024, 1, 15), 0);
        let err = CategoryTreeBuilder::new()
            .build(&db, &project, CategoryRef::Id(foreign.id), &window)
            .await
            .unwrap_err();
        assert!(matches!(err, ComputeError::CategoryNotFound(_)));
    }

    #[tokio::test]
    async fn test_rebuild_without_writes_is_identical() {
        let db = setup_db().await.unwrap();
        let project = new_project(&db).await.unwrap();
        let food = new_category(&db, &project, "Food", None).await.unwrap();
        new_one_off(&db, &project, Some(food.id), 12, false, day(2024, 1, 10)).await.unwrap();
        new_one_off(&db, &project, None, 3, true, day(2024, 1, 11)).await.unwrap();

        let window = MonthWindow::resolve(day(2024, 1, 15), 0);
        let builder = CategoryTreeBuilder::new();

        let first = builder.build(&db, &project, CategoryRef::Root, &window).await.unwrap();
        let second = builder.build(&db, &project, CategoryRef::Root, &window).await.unwrap();
        assert_eq!(first, second);
    }
}
