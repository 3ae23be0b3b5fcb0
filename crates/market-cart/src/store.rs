//! The cart store: one writer task that owns every cart mutation.
//!
//! Mutations are queued on a channel and applied strictly in order. Each one
//! reads the stored cart, applies the change, writes the result back and only
//! then publishes it to subscribers, so two mutations issued back to back can
//! never compute from the same stale snapshot.

use market_store::{KvStore, RetryPolicy};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::cart::{encode, Cart, HydrateOutcome, LineItem, NewLineItem};
use crate::config::CartConfig;
use crate::error::CartError;
use crate::ids::ProductId;

type Reply<T> = oneshot::Sender<Result<T, CartError>>;

enum Command {
    Add(NewLineItem, Reply<()>),
    Increment(ProductId, Reply<()>),
    Decrement(ProductId, Reply<()>),
    Clear(Reply<()>),
    Reload(Reply<HydrateOutcome>),
    Shutdown,
}

/// Owns the cart writer task for one app session.
///
/// Create it once at startup with [`CartStore::open`], hand
/// [`CartHandle`]s to the UI, and call [`CartStore::shutdown`] when the
/// session ends.
pub struct CartStore {
    handle: CartHandle,
    writer: JoinHandle<()>,
}

impl CartStore {
    /// Hydrate the cart from `store` and start the writer.
    ///
    /// Fails only if storage cannot be read; a corrupt stored cart starts the
    /// session empty and is reported in the returned [`HydrateOutcome`].
    /// Mutations then fail with [`CartError::CorruptCart`] until the cart is
    /// cleared.
    pub async fn open<S>(store: S, config: CartConfig) -> Result<(Self, HydrateOutcome), CartError>
    where
        S: KvStore + 'static,
    {
        let writer = Writer {
            store,
            key: config.storage_key(),
            retry: config.retry.policy(),
            products: watch::Sender::new(Vec::new()),
        };

        let outcome = writer.hydrate().await?;
        let products = writer.products.subscribe();

        let (commands, rx) = mpsc::channel(config.queue_capacity.max(1));
        let task = tokio::spawn(writer.run(rx));

        let store = Self {
            handle: CartHandle { commands, products },
            writer: task,
        };
        Ok((store, outcome))
    }

    /// A handle for UI code. Handles are cheap to clone.
    pub fn handle(&self) -> CartHandle {
        self.handle.clone()
    }

    /// Stop the writer after every mutation queued so far has finished.
    ///
    /// Handles still held elsewhere fail with
    /// [`CartError::NotInitialized`] from then on.
    pub async fn shutdown(self) {
        if self.handle.commands.send(Command::Shutdown).await.is_err() {
            debug!("cart writer already stopped");
        }
        if let Err(e) = self.writer.await {
            warn!(error = %e, "cart writer task failed");
        }
    }
}

/// Cloneable access to a running [`CartStore`].
///
/// Every mutation resolves once the new cart is persisted and published,
/// or with the error that stopped it.
#[derive(Clone)]
pub struct CartHandle {
    commands: mpsc::Sender<Command>,
    products: watch::Receiver<Vec<LineItem>>,
}

impl CartHandle {
    /// Current line items.
    pub fn products(&self) -> Vec<LineItem> {
        self.products.borrow().clone()
    }

    /// Receiver that is notified on every published change.
    pub fn subscribe(&self) -> watch::Receiver<Vec<LineItem>> {
        self.products.clone()
    }

    /// Add a product, or increase its quantity if already in the cart.
    pub async fn add_to_cart(&self, item: NewLineItem) -> Result<(), CartError> {
        self.request(|reply| Command::Add(item, reply)).await
    }

    /// Increase a product's quantity. Unknown products are ignored.
    pub async fn increment(&self, id: impl Into<ProductId>) -> Result<(), CartError> {
        let id = id.into();
        self.request(|reply| Command::Increment(id, reply)).await
    }

    /// Decrease a product's quantity, removing it at zero. Unknown products are ignored.
    pub async fn decrement(&self, id: impl Into<ProductId>) -> Result<(), CartError> {
        let id = id.into();
        self.request(|reply| Command::Decrement(id, reply)).await
    }

    /// Remove every item and persist the empty cart, replacing a corrupt one.
    pub async fn clear(&self) -> Result<(), CartError> {
        self.request(Command::Clear).await
    }

    /// Re-read the stored cart and publish it.
    pub async fn reload(&self) -> Result<HydrateOutcome, CartError> {
        self.request(Command::Reload).await
    }

    async fn request<T>(&self, command: impl FnOnce(Reply<T>) -> Command) -> Result<T, CartError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| CartError::NotInitialized)?;
        response.await.map_err(|_| CartError::NotInitialized)?
    }
}

struct Writer<S> {
    store: S,
    key: String,
    retry: RetryPolicy,
    products: watch::Sender<Vec<LineItem>>,
}

impl<S: KvStore> Writer<S> {
    async fn run(self, mut commands: mpsc::Receiver<Command>) {
        while let Some(command) = commands.recv().await {
            match command {
                Command::Add(item, reply) => {
                    let _ = reply.send(self.add(item).await);
                }
                Command::Increment(id, reply) => {
                    let _ = reply.send(self.increment(id).await);
                }
                Command::Decrement(id, reply) => {
                    let _ = reply.send(self.decrement(id).await);
                }
                Command::Clear(reply) => {
                    let _ = reply.send(self.clear().await);
                }
                Command::Reload(reply) => {
                    let _ = reply.send(self.hydrate().await);
                }
                Command::Shutdown => break,
            }
        }
        debug!(key = %self.key, "cart writer stopped");
    }

    #[instrument(skip(self), fields(key = %self.key))]
    async fn hydrate(&self) -> Result<HydrateOutcome, CartError> {
        let outcome = self.read().await?;
        match &outcome {
            HydrateOutcome::Empty => debug!("no stored cart"),
            HydrateOutcome::Corrupt(reason) => {
                warn!(reason = %reason, "stored cart is corrupt, starting empty")
            }
            HydrateOutcome::Loaded(cart) => {
                info!(items = cart.unique_item_count(), "cart hydrated")
            }
        }
        self.publish(outcome.clone().into_cart());
        Ok(outcome)
    }

    #[instrument(skip_all, fields(product_id = %item.id))]
    async fn add(&self, item: NewLineItem) -> Result<(), CartError> {
        self.mutate(|cart| cart.add_item(item)).await
    }

    #[instrument(skip_all, fields(product_id = %id))]
    async fn increment(&self, id: ProductId) -> Result<(), CartError> {
        self.mutate(|cart| cart.increment(&id)).await
    }

    #[instrument(skip_all, fields(product_id = %id))]
    async fn decrement(&self, id: ProductId) -> Result<(), CartError> {
        self.mutate(|cart| Ok(cart.decrement(&id))).await
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<(), CartError> {
        let cart = Cart::new();
        self.write(&cart).await?;
        self.publish(cart);
        Ok(())
    }

    /// Read-modify-write against storage. `apply` returns whether it changed
    /// anything; unchanged carts are neither written nor published. A corrupt
    /// stored cart is left in place and reported; only `clear` replaces it.
    async fn mutate<F>(&self, apply: F) -> Result<(), CartError>
    where
        F: FnOnce(&mut Cart) -> Result<bool, CartError>,
    {
        let mut cart = match self.read().await? {
            HydrateOutcome::Loaded(cart) => cart,
            HydrateOutcome::Empty => Cart::new(),
            HydrateOutcome::Corrupt(reason) => {
                warn!(reason = %reason, "stored cart is corrupt, refusing to overwrite");
                return Err(CartError::CorruptCart(reason));
            }
        };

        if !apply(&mut cart)? {
            debug!("product not in cart, nothing to do");
            return Ok(());
        }

        self.write(&cart).await?;
        debug!(items = cart.unique_item_count(), total = cart.item_count(), "cart saved");
        self.publish(cart);
        Ok(())
    }

    async fn read(&self) -> Result<HydrateOutcome, CartError> {
        let raw = self.retry.run("get", || self.store.get(&self.key)).await?;
        Ok(HydrateOutcome::decode(raw.as_deref()))
    }

    async fn write(&self, cart: &Cart) -> Result<(), CartError> {
        let encoded = encode(cart)?;
        self.retry
            .run("set", || self.store.set(&self.key, encoded.clone()))
            .await?;
        Ok(())
    }

    fn publish(&self, cart: Cart) {
        self.products.send_replace(cart.into_items());
    }
}
