//! Catalog service functions.

use super::error::CatalogError;
use super::models::{CarDetail, CarFilterOptions, CarSummary};
use super::requests::{CarFilter, CarListQuery, FeaturedQuery};
use super::store::CatalogStore;

/// A page of cars together with the paging it was requested with
#[derive(Debug, Clone)]
pub struct CarListing {
    pub cars: Vec<CarSummary>,
    pub total: i64,
    pub page: i64,
    pub items_per_page: i64,
}

impl CarListing {
    pub fn total_pages(&self) -> i64 {
        (self.total + self.items_per_page - 1) / self.items_per_page
    }
}

/// List available cars with search, filters, sorting and pagination.
pub async fn list_cars(
    store: &dyn CatalogStore,
    query: &CarListQuery,
) -> Result<CarListing, CatalogError> {
    let filter = CarFilter::try_from(query)?;
    let page = store.cars(&filter).await?;

    tracing::debug!(
        page = filter.page,
        total = page.total,
        returned = page.cars.len(),
        "Listed cars"
    );

    Ok(CarListing {
        cars: page.cars,
        total: page.total,
        page: filter.page,
        items_per_page: filter.items_per_page,
    })
}

/// Newest featured cars
pub async fn featured_cars(
    store: &dyn CatalogStore,
    query: &FeaturedQuery,
) -> Result<Vec<CarSummary>, CatalogError> {
    Ok(store.featured_cars(query.limit()).await?)
}

pub async fn filter_options(store: &dyn CatalogStore) -> Result<CarFilterOptions, CatalogError> {
    Ok(store.filter_options().await?)
}

/// Car details by slug; withdrawn cars are not found.
pub async fn car_detail(store: &dyn CatalogStore, slug: &str) -> Result<CarDetail, CatalogError> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Err(CatalogError::NotFound("Car not found.".to_string()));
    }
    store
        .car_by_slug(slug)
        .await?
        .ok_or_else(|| CatalogError::NotFound("Car not found.".to_string()))
}


#[cfg(test)]
mod tests {
    use super::fixtures::{car, featured};
    use super::*;
    use crate::catalog::requests::MAX_ITEMS_PER_PAGE;
    use crate::catalog::store::InMemoryCatalogStore;

    fn store() -> InMemoryCatalogStore {
        InMemoryCatalogStore::new()
            .with_car(featured(car("1", "Toyota Vios", "Toyota", "Sedan", 800_000, 1)))
            .with_car(car("2", "Toyota Fortuner", "Toyota", "SUV", 1_400_000, 2))
            .with_car(featured(car("3", "Kia Morning", "Kia", "Hatchback", 550_000, 3)))
            .with_car(car("4", "Ford Transit", "Ford", "Van", 1_900_000, 4))
            .with_car(car("5", "Hyundai Santa Fe", "Hyundai", "SUV", 1_500_000, 5))
            .with_withdrawn_car(featured(car("6", "Mazda CX-5", "Mazda", "SUV", 1_200_000, 6)))
    }

    fn ids(cars: &[CarSummary]) -> Vec<&str> {
        cars.iter().map(|c| c.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_default_listing_is_newest_first_and_hides_withdrawn() {
        let listing = list_cars(&store(), &CarListQuery::default()).await.unwrap();
        assert_eq!(ids(&listing.cars), vec!["5", "4", "3", "2", "1"]);
        assert_eq!(listing.total, 5);
        assert_eq!(listing.total_pages(), 1);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_across_fields() {
        let query = CarListQuery {
            search: Some("suv".to_string()),
            ..Default::default()
        };
        let listing = list_cars(&store(), &query).await.unwrap();
        assert_eq!(ids(&listing.cars), vec!["5", "2"]);

        let query = CarListQuery {
            search: Some("TOYOTA".to_string()),
            ..Default::default()
        };
        assert_eq!(list_cars(&store(), &query).await.unwrap().total, 2);
    }

    #[tokio::test]
    async fn test_brand_and_type_filters_combine() {
        let query = CarListQuery {
            brand: Some("Toyota".to_string()),
            car_type: Some("SUV".to_string()),
            ..Default::default()
        };
        let listing = list_cars(&store(), &query).await.unwrap();
        assert_eq!(ids(&listing.cars), vec!["2"]);
    }

    #[tokio::test]
    async fn test_pagination_reports_total_and_pages() {
        let query = CarListQuery {
            page: Some(2),
            items_per_page: Some(2),
            ..Default::default()
        };
        let listing = list_cars(&store(), &query).await.unwrap();
        assert_eq!(ids(&listing.cars), vec!["3", "2"]);
        assert_eq!(listing.total, 5);
        assert_eq!(listing.total_pages(), 3);

        let query = CarListQuery {
            page: Some(9),
            items_per_page: Some(MAX_ITEMS_PER_PAGE),
            ..Default::default()
        };
        let listing = list_cars(&store(), &query).await.unwrap();
        assert!(listing.cars.is_empty());
        assert_eq!(listing.total, 5);
    }

    #[tokio::test]
    async fn test_sort_by_price_ascending() {
        let query = CarListQuery {
            sort_by: Some("price_per_day".to_string()),
            ascending: Some(true),
            ..Default::default()
        };
        let listing = list_cars(&store(), &query).await.unwrap();
        assert_eq!(ids(&listing.cars), vec!["3", "1", "2", "5", "4"]);
    }

    #[tokio::test]
    async fn test_unknown_sort_is_validation_error() {
        let query = CarListQuery {
            sort_by: Some("horsepower".to_string()),
            ..Default::default()
        };
        let err = list_cars(&store().unavailable(), &query).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_featured_cars_skip_withdrawn() {
        let cars = featured_cars(&store(), &FeaturedQuery::default()).await.unwrap();
        assert_eq!(ids(&cars), vec!["3", "1"]);

        let cars = featured_cars(&store(), &FeaturedQuery { limit: Some(1) })
            .await
            .unwrap();
        assert_eq!(ids(&cars), vec!["3"]);
    }

    #[tokio::test]
    async fn test_filter_options_are_distinct_and_sorted() {
        let options = filter_options(&store()).await.unwrap();
        assert_eq!(options.brands, vec!["Ford", "Hyundai", "Kia", "Toyota"]);
        assert_eq!(options.types, vec!["Hatchback", "SUV", "Sedan", "Van"]);
    }

    #[tokio::test]
    async fn test_car_detail_by_slug() {
        let detail = car_detail(&store(), "kia-morning").await.unwrap();
        assert_eq!(detail.summary.id, "3");

        for slug in ["", "  ", "mazda-cx-5", "no-such-car"] {
            let err = car_detail(&store(), slug).await.unwrap_err();
            assert!(matches!(err, CatalogError::NotFound(_)), "{}", slug);
        }
    }

    #[tokio::test]
    async fn test_unavailable_store_is_infrastructure_error() {
        let err = list_cars(&store().unavailable(), &CarListQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Infrastructure(_)));
    }
}
